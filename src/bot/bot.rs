use crate::{
    bot::form::{describe_form, map_click, submit_field},
    estimator::{format::render_text, Estimator},
    models::session::FormSession,
};
use anyhow::Result;
use log::{error, info};
use std::sync::Arc;
use teloxide::{
    dispatching::{
        dialogue::{Dialogue, InMemStorage},
        DefaultKey, HandlerExt, UpdateFilterExt,
    },
    dptree,
    prelude::{Dispatcher, LoggingErrorHandler},
    requests::Requester,
    types::{Message, Update},
    utils::command::{BotCommands, ParseError},
    Bot,
};

use super::bot_types::{FieldKind, FieldReply};

pub type FormDialogue = Dialogue<FormSession, InMemStorage<FormSession>>;

#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "lowercase",
    description = "Estos son los comandos disponibles:"
)]
pub enum Command {
    #[command(description = "Ayuda")]
    Help,

    #[command(description = "Muestra la ubicación seleccionada en el mapa")]
    Ubicacion,

    #[command(
        description = "Fija la ubicación a mano. Ejemplo: /coordenadas -34.6037 -58.3816. También podés enviar una ubicación desde el mapa.",
        parse_with = keep_args
    )]
    Coordenadas(String),

    #[command(
        description = "Comuna de la propiedad. Ejemplo: /comuna 7",
        parse_with = keep_args
    )]
    Comuna(String),

    #[command(description = "Dormitorios (0-10)", parse_with = keep_args)]
    Dormitorios(String),

    #[command(description = "Baños (0-10)", parse_with = keep_args)]
    Banos(String),

    #[command(description = "Ambientes (0-20)", parse_with = keep_args)]
    Ambientes(String),

    #[command(
        description = "Superficie en m² (0-10000)",
        parse_with = keep_args
    )]
    Superficie(String),

    #[command(description = "Muestra los datos cargados de la propiedad")]
    Propiedad,

    #[command(description = "Calcula el precio estimado")]
    Calcular,
}

pub struct TasadorTelegramBot {
    pub dispatcher: Dispatcher<Arc<Bot>, anyhow::Error, DefaultKey>,
    pub tg: Arc<Bot>,
}

impl TasadorTelegramBot {
    pub async fn new(telegram_bot_token: &str, estimator: Estimator) -> Result<Self> {
        let tg = Arc::new(Bot::new(telegram_bot_token));
        tg.set_my_commands(Command::bot_commands()).await?;

        let handler = Update::filter_message()
            .enter_dialogue::<Message, InMemStorage<FormSession>, FormSession>()
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(handle_command),
            )
            .branch(
                dptree::filter(|message: Message| message.location().is_some())
                    .endpoint(handle_map_pin),
            );

        let dispatcher = Dispatcher::builder(tg.clone(), handler)
            .dependencies(dptree::deps![InMemStorage::<FormSession>::new(), estimator])
            .error_handler(LoggingErrorHandler::with_custom_text(
                "an error has occurred in the dispatcher",
            ))
            .build();

        let bot = TasadorTelegramBot {
            dispatcher,
            tg: tg.clone(),
        };

        Ok(bot)
    }

    pub fn spawn(
        mut self,
    ) -> (
        tokio::task::JoinHandle<()>,
        teloxide::dispatching::ShutdownToken,
    ) {
        let shutdown_token = self.dispatcher.shutdown_token();
        (
            tokio::spawn(async move { self.dispatcher.dispatch().await }),
            shutdown_token,
        )
    }
}

pub async fn handle_command(
    message: Message,
    tg: Arc<Bot>,
    command: Command,
    dialogue: FormDialogue,
    estimator: Estimator,
) -> Result<()> {
    async fn handle(
        message: &Message,
        tg: &Bot,
        command: Command,
        dialogue: &FormDialogue,
        estimator: Estimator,
    ) -> Result<()> {
        let chat_id = message.chat.id;
        let mut session = dialogue.get_or_default().await?;

        match command {
            Command::Help => {
                tg.send_message(chat_id, Command::descriptions().to_string())
                    .await?;
            }
            Command::Ubicacion => {
                send_marker(tg, message, &session).await?;
            }
            Command::Coordenadas(input) => {
                update_field(tg, message, dialogue, session, FieldKind::Coordinates, &input)
                    .await?;
            }
            Command::Comuna(input) => {
                update_field(tg, message, dialogue, session, FieldKind::District, &input).await?;
            }
            Command::Dormitorios(input) => {
                update_field(tg, message, dialogue, session, FieldKind::Bedrooms, &input).await?;
            }
            Command::Banos(input) => {
                update_field(tg, message, dialogue, session, FieldKind::Bathrooms, &input).await?;
            }
            Command::Ambientes(input) => {
                update_field(tg, message, dialogue, session, FieldKind::Rooms, &input).await?;
            }
            Command::Superficie(input) => {
                update_field(tg, message, dialogue, session, FieldKind::Surface, &input).await?;
            }
            Command::Propiedad => {
                tg.send_message(chat_id, describe_form(&session)).await?;
            }
            Command::Calcular => {
                // The predictor may block on I/O
                let session = tokio::task::spawn_blocking(move || {
                    session.calculate(&estimator);
                    session
                })
                .await?;

                info!("Calculated estimate for chat {}", chat_id);
                let text = render_text(&session.status);
                dialogue.update(session).await?;
                tg.send_message(chat_id, text).await?;
            }
        };
        Ok(())
    }

    if let Err(err) = handle(&message, &tg, command, &dialogue, estimator).await {
        error!("Failed to handle message: {}", err);
        tg.send_message(message.chat.id, "Algo salió mal, probá de nuevo")
            .await?;
    }

    Ok(())
}

pub async fn handle_map_pin(message: Message, tg: Arc<Bot>, dialogue: FormDialogue) -> Result<()> {
    let Some(location) = message.location() else {
        return Ok(());
    };

    let mut session = dialogue.get_or_default().await?;
    if map_click(&mut session, location.latitude, location.longitude) {
        dialogue.update(session.clone()).await?;
    }
    send_marker(&tg, &message, &session).await?;

    Ok(())
}

async fn update_field(
    tg: &Bot,
    message: &Message,
    dialogue: &FormDialogue,
    mut session: FormSession,
    kind: FieldKind,
    input: &str,
) -> Result<()> {
    let reply = submit_field(&mut session, kind, input);
    if let FieldReply::Updated(_) = reply {
        dialogue.update(session.clone()).await?;
        if kind == FieldKind::Coordinates {
            return send_marker(tg, message, &session).await;
        }
    }
    tg.send_message(message.chat.id, reply.text()).await?;
    Ok(())
}

async fn send_marker(tg: &Bot, message: &Message, session: &FormSession) -> Result<()> {
    let current = session.location.current();
    tg.send_location(message.chat.id, current.lat, current.lon)
        .await?;
    Ok(())
}

/// Hands the raw text to the handler so bad values get an answer instead of
/// being dropped by the command filter.
fn keep_args(input: String) -> Result<(String,), ParseError> {
    Ok((input,))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_values_still_parse_as_commands() {
        for text in [
            "/comuna 16",
            "/dormitorios abc",
            "/coordenadas palermo",
            "/superficie x",
        ] {
            assert!(Command::parse(text, "tasador_bot").is_ok(), "{text}");
        }
    }

    #[test]
    fn test_command_keeps_raw_arguments() {
        match Command::parse("/coordenadas -34.60 -58.40", "tasador_bot") {
            Ok(Command::Coordenadas(input)) => assert_eq!(input, "-34.60 -58.40"),
            _ => panic!("expected /coordenadas"),
        }
        match Command::parse("/comuna", "tasador_bot") {
            Ok(Command::Comuna(input)) => assert!(input.is_empty()),
            _ => panic!("expected /comuna"),
        }
    }
}
