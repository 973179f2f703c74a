use actix::io::SinkWrite;
use actix::prelude::*;
use actix_codec::Framed;
use awc::error::WsProtocolError;
use awc::ws::{Codec, Frame, Message};
use awc::{BoxedSocket, Client};
use futures::stream::{SplitSink, StreamExt};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::models::{ClientMessage, ServerEvent};

type WsSink = SplitSink<Framed<BoxedSocket, Codec>, Message>;

/// Decode one text frame pushed by the server
pub fn decode_event(payload: &[u8]) -> ClientResult<ServerEvent> {
    Ok(serde_json::from_slice(payload)?)
}

/// WebSocket connection to the game server.
///
/// Inbound frames become `ServerEvent`s for the view controller; outbound
/// `ClientMessage`s are written as JSON text frames.
pub struct ServerConnection {
    pub id: Uuid,
    sink: SinkWrite<Message, WsSink>,
    events: Recipient<ServerEvent>,
    stop_system_on_close: bool,
}

impl ServerConnection {
    pub async fn connect(
        url: &str,
        events: Recipient<ServerEvent>,
        stop_system_on_close: bool,
    ) -> ClientResult<Addr<ServerConnection>> {
        let id = Uuid::new_v4();
        info!("Opening WebSocket connection {} to {}", id, url);

        let (response, framed) = Client::new()
            .ws(url)
            .connect()
            .await
            .map_err(|e| ClientError::ConnectionFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        debug!("Handshake response: {:?}", response);

        let (sink, stream) = framed.split();
        Ok(ServerConnection::create(|ctx| {
            ServerConnection::add_stream(stream, ctx);
            ServerConnection {
                id,
                sink: SinkWrite::new(sink, ctx),
                events,
                stop_system_on_close,
            }
        }))
    }

    fn handle_text(&mut self, payload: &[u8]) {
        match decode_event(payload) {
            Ok(event) => {
                debug!("Received event: {:?}", event);
                self.events.do_send(event);
            }
            Err(e) => {
                warn!("Ignoring frame on {}: {}", self.id, e);
            }
        }
    }
}

impl Actor for ServerConnection {
    type Context = Context<Self>;

    fn started(&mut self, _: &mut Self::Context) {
        info!("WebSocket connection started: {}", self.id);
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        info!("WebSocket connection closed: {}", self.id);
        if self.stop_system_on_close {
            System::current().stop();
        }
    }
}

impl Handler<ClientMessage> for ServerConnection {
    type Result = ();

    fn handle(&mut self, msg: ClientMessage, _: &mut Self::Context) {
        let text = match serde_json::to_string(&msg) {
            Ok(text) => text,
            Err(e) => {
                warn!("Error serializing message {:?}: {}", msg, e);
                return;
            }
        };
        debug!("Sending to server: {}", text);
        if self.sink.write(Message::Text(text.into())).is_err() {
            warn!("Connection {} is closed, dropped {:?}", self.id, msg);
        }
    }
}

impl StreamHandler<Result<Frame, WsProtocolError>> for ServerConnection {
    fn handle(&mut self, msg: Result<Frame, WsProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(Frame::Text(payload)) => {
                self.handle_text(&payload);
            }
            Ok(Frame::Ping(payload)) => {
                if self.sink.write(Message::Pong(payload)).is_err() {
                    warn!("Could not answer ping on {}", self.id);
                }
            }
            Ok(Frame::Pong(_)) => {}
            Ok(Frame::Binary(_)) => {
                warn!("Binary messages are not supported");
            }
            Ok(Frame::Continuation(_)) => {
                warn!("Fragmented messages are not supported");
            }
            Ok(Frame::Close(reason)) => {
                info!("Connection closed by server: {:?}", reason);
                ctx.stop();
            }
            Err(e) => {
                warn!("WebSocket protocol error on {}: {}", self.id, e);
                ctx.stop();
            }
        }
    }

    fn finished(&mut self, ctx: &mut Self::Context) {
        info!("Server stream finished for {}", self.id);
        ctx.stop();
    }
}

impl actix::io::WriteHandler<WsProtocolError> for ServerConnection {}
