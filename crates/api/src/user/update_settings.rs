use crate::shared::usecase::{execute, UseCase};
use crate::{error::DaylineError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dayline_api_structs::update_settings::*;
use dayline_domain::User;
use dayline_infra::DaylineContext;

pub async fn update_settings_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<DaylineContext>,
) -> Result<HttpResponse, DaylineError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = UpdateSettingsUseCase {
        user,
        name: body.0.name,
        remind_before: body.0.remind_before,
        remind_on_start: body.0.remind_on_start,
        nudge_mid: body.0.nudge_mid,
        congratulate_on_end: body.0.congratulate_on_end,
        slot_duration_minutes: body.0.slot_duration_minutes,
        timezone: body.0.timezone,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.user)))
        .map_err(DaylineError::from)
}

/// Applies the fields that are present and leaves the rest untouched.
/// The timezone is stored as given, reminder delivery falls back to the
/// configured default when it does not parse.
#[derive(Debug)]
pub struct UpdateSettingsUseCase {
    pub user: User,
    pub name: Option<String>,
    pub remind_before: Option<bool>,
    pub remind_on_start: Option<bool>,
    pub nudge_mid: Option<bool>,
    pub congratulate_on_end: Option<bool>,
    pub slot_duration_minutes: Option<i64>,
    pub timezone: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for DaylineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateSettingsUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateSettings";

    async fn execute(&mut self, ctx: &DaylineContext) -> Result<Self::Response, Self::Error> {
        let mut user = self.user.clone();

        if let Some(name) = &self.name {
            user.display_name = Some(name.clone());
        }
        if let Some(remind_before) = self.remind_before {
            user.settings.reminders.remind_before = remind_before;
        }
        if let Some(remind_on_start) = self.remind_on_start {
            user.settings.reminders.remind_on_start = remind_on_start;
        }
        if let Some(nudge_mid) = self.nudge_mid {
            user.settings.reminders.nudge_mid = nudge_mid;
        }
        if let Some(congratulate_on_end) = self.congratulate_on_end {
            user.settings.reminders.congratulate_on_end = congratulate_on_end;
        }
        if let Some(slot_duration_minutes) = self.slot_duration_minutes {
            user.settings.slot_duration_minutes = slot_duration_minutes;
        }
        if let Some(timezone) = &self.timezone {
            user.settings.timezone = timezone.clone();
        }
        user.updated = ctx.sys.get_timestamp_millis();

        match ctx.repos.users.save(&user).await {
            Ok(_) => Ok(UseCaseRes { user }),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update_nothing(user: User) -> UpdateSettingsUseCase {
        UpdateSettingsUseCase {
            user,
            name: None,
            remind_before: None,
            remind_on_start: None,
            nudge_mid: None,
            congratulate_on_end: None,
            slot_duration_minutes: None,
            timezone: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn it_applies_partial_updates() {
        let ctx = DaylineContext::create_inmemory();
        let user = User::new("lena".into(), "hash".into(), None, 0);
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let mut usecase = update_nothing(user.clone());
        usecase.nudge_mid = Some(false);
        usecase.timezone = Some("Europe/Oslo".into());
        let res = usecase.execute(&ctx).await.expect("To update settings");

        assert!(!res.user.settings.reminders.nudge_mid);
        assert_eq!(res.user.settings.timezone, "Europe/Oslo");
        // Fields that were not in the request keep their values
        assert!(res.user.settings.reminders.remind_before);
        assert_eq!(res.user.settings.slot_duration_minutes, 60);

        let stored = ctx.repos.users.find(&user.id).await.expect("To find user");
        assert!(!stored.settings.reminders.nudge_mid);
    }

    #[actix_web::main]
    #[test]
    async fn it_stores_timezones_verbatim() {
        let ctx = DaylineContext::create_inmemory();
        let user = User::new("lena".into(), "hash".into(), None, 0);
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let mut usecase = update_nothing(user);
        usecase.timezone = Some("Not/AZone".into());
        let res = usecase.execute(&ctx).await.expect("To update settings");

        assert_eq!(res.user.settings.timezone, "Not/AZone");
        assert!(res.user.settings.tz().is_none());
    }
}
