use crate::error::DaylineError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use dayline_api_structs::telegram_webhook::*;
use dayline_api_structs::TelegramUpdate;
use dayline_domain::{Day, TelegramLink};
use dayline_infra::{escape_html, DaylineContext};
use tracing::warn;

const WEBHOOK_SECRET_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

const START_REPLY: &str = "Hello! I am the dayline bot.\n\
I deliver reminders for the tasks you plan in dayline.\n\
Link this chat with /link &lt;code&gt;, you find the code in your dayline settings.";

const USAGE_REPLY: &str = "I understand these commands:\n\
/link &lt;code&gt; - link this chat to your dayline account\n\
/today - show your plan for today\n\
/settings - show your reminder settings\n\
/unlink - disconnect this chat\n\
/start - how linking works";

const NOT_LINKED_REPLY: &str = "This chat is not linked to a dayline account yet.\n\
Use /link &lt;code&gt; with a code from your dayline settings.";

/// Telegram sends this header on every webhook call when a secret token
/// was registered. Checked only when one is configured.
fn verify_webhook_secret(
    http_req: &HttpRequest,
    ctx: &DaylineContext,
) -> Result<(), DaylineError> {
    let expected = match &ctx.config.telegram_webhook_secret {
        Some(secret) => secret,
        None => return Ok(()),
    };
    let given = http_req
        .headers()
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|header| header.to_str().ok());
    if given == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(DaylineError::Unauthorized(
            "Invalid webhook secret token".into(),
        ))
    }
}

pub async fn telegram_webhook_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<DaylineContext>,
) -> Result<HttpResponse, DaylineError> {
    verify_webhook_secret(&http_req, &ctx)?;

    let usecase = TelegramWebhookUseCase { update: body.0 };

    execute(usecase, &ctx)
        .await
        .map(|_| HttpResponse::Ok().json(APIResponse { ok: true }))
        .map_err(DaylineError::from)
}

enum Command {
    Start,
    Link(String),
    Today,
    Settings,
    Unlink,
    Other,
}

fn parse_command(text: &str) -> Command {
    let mut words = text.split_whitespace();
    let head = match words.next() {
        Some(head) => head,
        None => return Command::Other,
    };
    // In group chats commands arrive as /command@botname
    let head = head.split('@').next().unwrap_or(head);
    match head {
        "/start" => Command::Start,
        "/link" => Command::Link(words.next().unwrap_or("").to_string()),
        "/today" => Command::Today,
        "/settings" => Command::Settings,
        "/unlink" => Command::Unlink,
        _ => Command::Other,
    }
}

/// Handles one update from the telegram bot api. The reply goes back to
/// the chat the update came from, over the messenger rather than as the
/// webhook response body.
#[derive(Debug)]
pub struct TelegramWebhookUseCase {
    pub update: TelegramUpdate,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reply: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for DaylineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            // A 500 makes telegram deliver the update again later
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for TelegramWebhookUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "TelegramWebhook";

    async fn execute(&mut self, ctx: &DaylineContext) -> Result<Self::Response, Self::Error> {
        let message = match &self.update.message {
            Some(message) => message,
            None => return Ok(UseCaseRes { reply: None }),
        };
        let text = match &message.text {
            Some(text) => text.clone(),
            None => return Ok(UseCaseRes { reply: None }),
        };
        let chat_id = message.chat.id.to_string();
        let username = message.from.as_ref().and_then(|from| from.username.clone());

        let reply = match parse_command(&text) {
            Command::Start => START_REPLY.to_string(),
            Command::Link(code) => link_chat(&chat_id, username, &code, ctx).await?,
            Command::Today => today_reply(&chat_id, ctx).await?,
            Command::Settings => settings_reply(&chat_id, ctx).await?,
            Command::Unlink => unlink_chat(&chat_id, ctx).await?,
            Command::Other => USAGE_REPLY.to_string(),
        };

        if !ctx.messenger.notify(&chat_id, &reply).await {
            warn!("Unable to reply to telegram chat: {}.", chat_id);
        }
        Ok(UseCaseRes { reply: Some(reply) })
    }
}

async fn link_chat(
    chat_id: &str,
    username: Option<String>,
    code: &str,
    ctx: &DaylineContext,
) -> Result<String, UseCaseError> {
    if code.is_empty() {
        return Ok("Usage: /link &lt;code&gt;, the code is in your dayline settings.".to_string());
    }

    let unknown_code =
        "That code does not look right. Check your dayline settings for the current one."
            .to_string();
    let link_code = match ctx.repos.link_codes.find_by_code(code).await {
        Some(link_code) => link_code,
        None => return Ok(unknown_code),
    };
    let now = ctx.sys.get_timestamp_millis();
    if link_code.is_expired(now) {
        return Ok(
            "That code has expired. Create a fresh one in your dayline settings.".to_string(),
        );
    }
    let mut user = match ctx.repos.users.find(&link_code.user_id).await {
        Some(user) => user,
        None => return Ok(unknown_code),
    };

    // A chat belongs to at most one account, detach it from any other
    if let Some(mut other) = ctx.repos.users.find_by_chat_id(chat_id).await {
        if other.id != user.id {
            other.telegram = None;
            other.updated = now;
            if ctx.repos.users.save(&other).await.is_err() {
                return Err(UseCaseError::StorageError);
            }
        }
    }

    user.telegram = Some(TelegramLink {
        chat_id: chat_id.to_string(),
        username,
    });
    user.updated = now;
    if ctx.repos.users.save(&user).await.is_err() {
        return Err(UseCaseError::StorageError);
    }
    ctx.repos.link_codes.delete_by_code(code).await;

    let name = user.display_name.unwrap_or(user.username);
    Ok(format!(
        "Linked! Hi {}, your reminders will show up in this chat.",
        escape_html(&name)
    ))
}

async fn today_reply(chat_id: &str, ctx: &DaylineContext) -> Result<String, UseCaseError> {
    let user = match ctx.repos.users.find_by_chat_id(chat_id).await {
        Some(user) => user,
        None => return Ok(NOT_LINKED_REPLY.to_string()),
    };

    let date = Day::from_datetime(&ctx.local_datetime(&user));
    let tasks = match ctx
        .repos
        .schedules
        .find_by_user_and_date(&user.id, &date)
        .await
    {
        Some(schedule) => ctx.repos.tasks.find_by_schedule(&schedule.id).await,
        None => Vec::new(),
    };
    if tasks.is_empty() {
        return Ok(format!("Nothing planned for {} yet.", date));
    }

    let mut lines = vec![format!("<b>Your plan for {}</b>", date)];
    for task in tasks {
        let mut line = format!(
            "{} - {} {}",
            task.start,
            task.end,
            escape_html(&task.description)
        );
        if task.completed {
            line.push_str(" (done)");
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

async fn settings_reply(chat_id: &str, ctx: &DaylineContext) -> Result<String, UseCaseError> {
    let user = match ctx.repos.users.find_by_chat_id(chat_id).await {
        Some(user) => user,
        None => return Ok(NOT_LINKED_REPLY.to_string()),
    };

    let on_off = |enabled: bool| if enabled { "on" } else { "off" };
    let reminders = &user.settings.reminders;
    Ok(format!(
        "<b>Your reminder settings</b>\n\
         Heads up before start: {}\n\
         On start: {}\n\
         Halfway nudge: {}\n\
         On end: {}\n\
         Timezone: {}",
        on_off(reminders.remind_before),
        on_off(reminders.remind_on_start),
        on_off(reminders.nudge_mid),
        on_off(reminders.congratulate_on_end),
        escape_html(&user.settings.timezone)
    ))
}

async fn unlink_chat(chat_id: &str, ctx: &DaylineContext) -> Result<String, UseCaseError> {
    let mut user = match ctx.repos.users.find_by_chat_id(chat_id).await {
        Some(user) => user,
        None => return Ok(NOT_LINKED_REPLY.to_string()),
    };

    user.telegram = None;
    user.updated = ctx.sys.get_timestamp_millis();
    if ctx.repos.users.save(&user).await.is_err() {
        return Err(UseCaseError::StorageError);
    }
    Ok("Done, this chat is no longer linked and reminders stop here.\n\
        Link again anytime with /link &lt;code&gt;."
        .to_string())
}
