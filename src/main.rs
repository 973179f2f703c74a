use actix::prelude::*;
use chess::Square;
use clap::Parser;
use futures::executor::block_on;
use log::{error, info, warn};
use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::sync::{Arc, Mutex};
use std::thread;

use chess_web_client::config::Config;
use chess_web_client::routes::{self, PIECE_CODES};
use chess_web_client::view::terminal::{PromptAnswers, TerminalCommand, TerminalPage, HELP};
use chess_web_client::websocket::{
    AttachConnection, DifficultySelected, DragStart, DropOutcome, DropPiece, HoverSquare,
    LeaveSquare, ResetClicked, ServerConnection, SnapEnd, ViewController,
};
use chess_web_client::ClientResult;

async fn start(config: Config, answers: PromptAnswers) -> ClientResult<Addr<ViewController>> {
    if config.preload_pieces {
        let client = awc::Client::default();
        let loaded = routes::preload_pieces(&client, &config.http_url, &config.piece_theme).await;
        info!("Preloaded {} of {} piece images", loaded, PIECE_CODES.len());
    }

    let page = TerminalPage::new(answers);
    let controller = ViewController::new(Box::new(page), config.clone()).start();

    let connection = ServerConnection::connect(&config.ws_url, controller.clone().recipient(), true).await?;
    controller.do_send(AttachConnection(connection.recipient()));
    Ok(controller)
}

fn play_move(
    controller: &Addr<ViewController>,
    answers: &PromptAnswers,
    source: Square,
    target: Square,
    promotion: Option<String>,
) {
    if let (Some(answer), Ok(mut queue)) = (promotion, answers.lock()) {
        queue.push_back(answer);
    }

    match block_on(controller.send(DragStart { square: source })) {
        Ok(true) => match block_on(controller.send(DropPiece { source, target })) {
            Ok(DropOutcome::Accepted) => controller.do_send(SnapEnd),
            Ok(DropOutcome::Snapback) => println!("Illegal move: {}{}", source, target),
            Err(e) => warn!("Drop was not delivered: {}", e),
        },
        Ok(false) => println!("The piece on {} cannot be moved now", source),
        Err(e) => warn!("Drag was not delivered: {}", e),
    }

    if let Ok(mut queue) = answers.lock() {
        queue.clear();
    }
}

/// Read commands from stdin until EOF or `quit`
fn spawn_input(controller: Addr<ViewController>, answers: PromptAnswers, system: System) {
    thread::spawn(move || {
        println!("{}", HELP);
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!("Error reading stdin: {}", e);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<TerminalCommand>() {
                Ok(TerminalCommand::Move { source, target, promotion }) => {
                    play_move(&controller, &answers, source, target, promotion);
                }
                Ok(TerminalCommand::Hover(square)) => controller.do_send(HoverSquare(square)),
                Ok(TerminalCommand::Out) => controller.do_send(LeaveSquare),
                Ok(TerminalCommand::Reset) => controller.do_send(ResetClicked),
                Ok(TerminalCommand::Difficulty(value)) => controller.do_send(DifficultySelected(value)),
                Ok(TerminalCommand::Board) => controller.do_send(SnapEnd),
                Ok(TerminalCommand::Help) => println!("{}", HELP),
                Ok(TerminalCommand::Quit) => break,
                Err(e) => println!("{}. {}", e, HELP),
            }
        }
        info!("Input closed, shutting down");
        system.stop();
    });
}

fn main() -> io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::parse();
    info!("Starting chess client, server at {}", config.ws_url);

    let system = System::new();
    let answers: PromptAnswers = Arc::new(Mutex::new(VecDeque::new()));

    let controller = match system.block_on(start(config, answers.clone())) {
        Ok(controller) => controller,
        Err(e) => {
            error!("{}", e);
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string()));
        }
    };

    let handle = system.block_on(async { System::current() });
    spawn_input(controller, answers, handle);

    system.run()
}
