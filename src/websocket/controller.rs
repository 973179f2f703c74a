use actix::prelude::*;
use awc::Client;
use chess::Square;
use log::{debug, info, warn};

use crate::config::Config;
use crate::models::{ClientMessage, Difficulty, ServerEvent, ViewModel};
use crate::routes;
use crate::view::Page;

/// Result of dropping a dragged piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Accepted,
    Snapback,
}

/// User starts dragging the piece on `square`
#[derive(Message)]
#[rtype(result = "bool")]
pub struct DragStart {
    pub square: Square,
}

/// User releases a dragged piece on `target`
#[derive(Message)]
#[rtype(result = "DropOutcome")]
pub struct DropPiece {
    pub source: Square,
    pub target: Square,
}

/// Drop animation finished
#[derive(Message)]
#[rtype(result = "()")]
pub struct SnapEnd;

#[derive(Message)]
#[rtype(result = "()")]
pub struct HoverSquare(pub Square);

#[derive(Message)]
#[rtype(result = "()")]
pub struct LeaveSquare;

#[derive(Message)]
#[rtype(result = "()")]
pub struct ResetClicked;

/// Raw value picked in the difficulty selector
#[derive(Message)]
#[rtype(result = "()")]
pub struct DifficultySelected(pub String);

/// Route outbound messages to a server connection
#[derive(Message)]
#[rtype(result = "()")]
pub struct AttachConnection(pub Recipient<ClientMessage>);

/// Owns the view model and is its only writer.
pub struct ViewController {
    pub(crate) model: ViewModel,
    pub(crate) page: Box<dyn Page>,
    pub(crate) config: Config,
    outbound: Option<Recipient<ClientMessage>>,
}

impl ViewController {
    pub fn new(page: Box<dyn Page>, config: Config) -> Self {
        ViewController {
            model: ViewModel::new(),
            page,
            config,
            outbound: None,
        }
    }

    pub fn model(&self) -> &ViewModel {
        &self.model
    }

    fn send(&self, msg: ClientMessage) {
        match &self.outbound {
            Some(recipient) => recipient.do_send(msg),
            None => debug!("No server connection, dropped {:?}", msg),
        }
    }
}

impl Actor for ViewController {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("View controller started");
        self.page.render_board(&self.model.board);
        ctx.run_interval(self.config.tick_interval(), |act, _| {
            act.send(ClientMessage::ClockTick);
        });
    }
}

impl Handler<AttachConnection> for ViewController {
    type Result = ();

    fn handle(&mut self, msg: AttachConnection, _: &mut Self::Context) {
        info!("Server connection attached");
        self.outbound = Some(msg.0);
    }
}

impl Handler<ServerEvent> for ViewController {
    type Result = ();

    fn handle(&mut self, msg: ServerEvent, _: &mut Self::Context) {
        self.on_server_event(msg);
    }
}

impl Handler<DragStart> for ViewController {
    type Result = MessageResult<DragStart>;

    fn handle(&mut self, msg: DragStart, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.on_drag_start(msg.square))
    }
}

impl Handler<DropPiece> for ViewController {
    type Result = MessageResult<DropPiece>;

    fn handle(&mut self, msg: DropPiece, _: &mut Self::Context) -> Self::Result {
        let (outcome, outbound) = self.on_drop(msg.source, msg.target);
        if let Some(outbound) = outbound {
            self.send(outbound);
        }
        MessageResult(outcome)
    }
}

impl Handler<SnapEnd> for ViewController {
    type Result = ();

    fn handle(&mut self, _: SnapEnd, _: &mut Self::Context) {
        self.on_snap_end();
    }
}

impl Handler<HoverSquare> for ViewController {
    type Result = ();

    fn handle(&mut self, msg: HoverSquare, _: &mut Self::Context) {
        self.on_mouseover_square(msg.0);
    }
}

impl Handler<LeaveSquare> for ViewController {
    type Result = ();

    fn handle(&mut self, _: LeaveSquare, _: &mut Self::Context) {
        self.on_mouseout_square();
    }
}

impl Handler<ResetClicked> for ViewController {
    type Result = ();

    fn handle(&mut self, _: ResetClicked, _: &mut Self::Context) {
        let msg = self.on_reset_clicked();
        self.send(msg);
    }
}

impl Handler<DifficultySelected> for ViewController {
    type Result = ();

    fn handle(&mut self, msg: DifficultySelected, ctx: &mut Self::Context) {
        let difficulty: Difficulty = match msg.0.parse() {
            Ok(difficulty) => difficulty,
            Err(e) => {
                warn!("Ignoring difficulty selection: {}", e);
                return;
            }
        };

        let base_url = self.config.http_url.clone();
        let request = async move {
            let client = Client::default();
            routes::set_difficulty(&client, &base_url, difficulty).await
        };
        ctx.spawn(
            request
                .into_actor(self)
                .map(move |result, act, _| act.on_difficulty_result(difficulty, result)),
        );
    }
}
