use async_trait::async_trait;
use bee_types::{
    CreateGameRequest, EndGameRequest, EndGameResponse, EndGameResult, GameSession,
    JoinGameRequest, JoinGameResult, LeaveGameRequest, ServiceResponse, SubmitWordRequest,
    SubmitWordResult,
};
use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ClientError;

/// Raw bytes of the live-update channel, as they arrive.
pub type UpdateStream = BoxStream<'static, Result<Bytes, ClientError>>;

/// The remote scoring/session service.
#[async_trait]
pub trait GameService: Send + Sync + 'static {
    async fn create_game(&self, request: CreateGameRequest) -> Result<GameSession, ClientError>;

    async fn join_game(
        &self,
        request: JoinGameRequest,
    ) -> Result<ServiceResponse<JoinGameResult>, ClientError>;

    async fn rejoin_game(
        &self,
        request: JoinGameRequest,
    ) -> Result<ServiceResponse<JoinGameResult>, ClientError>;

    async fn submit_word(
        &self,
        request: SubmitWordRequest,
    ) -> Result<ServiceResponse<SubmitWordResult>, ClientError>;

    async fn end_game(&self, request: EndGameRequest) -> Result<EndGameResult, ClientError>;

    async fn leave_game(&self, request: LeaveGameRequest) -> Result<EndGameResult, ClientError>;

    /// Open the server-sent-events channel for one player in one game.
    async fn open_updates(
        &self,
        game_code: &str,
        player_name: &str,
    ) -> Result<UpdateStream, ClientError>;
}

/// `GameService` over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpGameService {
    client: Client,
    base_url: Url,
    request_timeout: Duration,
}

impl HttpGameService {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.backend_host)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.backend_host, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.backend_host.clone()));
        }

        // No client-wide timeout: it would also cut off the long-lived
        // update stream. Plain calls get a per-request timeout instead.
        let client = Client::builder()
            .connect_timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url,
            request_timeout: config.request_timeout(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint<I>(&self, segments: I) -> Result<Url, ClientError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, ClientError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint([path])?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .timeout(self.request_timeout)
            .json(body)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice(&body) {
            Ok(decoded) => Ok(decoded),
            Err(_) if !status.is_success() => {
                warn!("{} answered HTTP {}", path, status);
                Err(ClientError::Status {
                    status: status.as_u16(),
                })
            }
            Err(e) => {
                warn!(
                    "Could not decode {} response: {} (body: {})",
                    path,
                    e,
                    String::from_utf8_lossy(&body)
                );
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl GameService for HttpGameService {
    async fn create_game(&self, request: CreateGameRequest) -> Result<GameSession, ClientError> {
        self.post("createGame", &request).await
    }

    async fn join_game(
        &self,
        request: JoinGameRequest,
    ) -> Result<ServiceResponse<JoinGameResult>, ClientError> {
        self.post("joinGame", &request).await
    }

    async fn rejoin_game(
        &self,
        request: JoinGameRequest,
    ) -> Result<ServiceResponse<JoinGameResult>, ClientError> {
        self.post("rejoinGame", &request).await
    }

    async fn submit_word(
        &self,
        request: SubmitWordRequest,
    ) -> Result<ServiceResponse<SubmitWordResult>, ClientError> {
        self.post("submitWord", &request).await
    }

    async fn end_game(&self, request: EndGameRequest) -> Result<EndGameResult, ClientError> {
        let response: EndGameResponse = self.post("endGame", &request).await?;
        Ok(response.response)
    }

    async fn leave_game(&self, request: LeaveGameRequest) -> Result<EndGameResult, ClientError> {
        let response: EndGameResponse = self.post("leaveGame", &request).await?;
        Ok(response.response)
    }

    async fn open_updates(
        &self,
        game_code: &str,
        player_name: &str,
    ) -> Result<UpdateStream, ClientError> {
        let url = self.endpoint([
            "subscribeToUpdates",
            "game",
            game_code,
            "player",
            player_name,
        ])?;
        debug!("Opening update stream {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?
            .error_for_status()?;

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(ClientError::from))
            .boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(host: &str) -> Result<HttpGameService, ClientError> {
        HttpGameService::new(&Config {
            backend_host: host.to_string(),
            ..Config::default()
        })
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let service = service("http://localhost:8080").unwrap();
        assert_eq!(
            service.endpoint(["createGame"]).unwrap().as_str(),
            "http://localhost:8080/createGame"
        );

        let service = HttpGameService::new(&Config {
            backend_host: "http://localhost:8080/api/".to_string(),
            ..Config::default()
        })
        .unwrap();
        assert_eq!(
            service.endpoint(["submitWord"]).unwrap().as_str(),
            "http://localhost:8080/api/submitWord"
        );
    }

    #[test]
    fn test_endpoint_escapes_player_names() {
        let service = service("http://localhost:8080").unwrap();
        let url = service
            .endpoint(["subscribeToUpdates", "game", "HIVE", "player", "Mary Jo"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/subscribeToUpdates/game/HIVE/player/Mary%20Jo"
        );
    }

    #[test]
    fn test_rejects_unusable_host() {
        assert!(matches!(
            service("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            service("mailto:bee@example.com"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
