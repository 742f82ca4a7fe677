use crate::error::DaylineError;
use actix_web::HttpRequest;
use dayline_domain::{User, ID};
use dayline_infra::DaylineContext;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    exp: usize,  // Expiration time (as UTC timestamp in seconds)
    iat: usize,  // Issued at (as UTC timestamp in seconds)
    sub: String, // Subject (whom token refers to)
}

/// Signs a short lived access token for the user. Expiry is enforced by
/// the decode step on every request.
pub fn create_access_token(user_id: &ID, ctx: &DaylineContext) -> Result<String, DaylineError> {
    let now = ctx.sys.get_timestamp_millis();
    let claims = Claims {
        exp: ((now + ctx.config.access_token_ttl) / 1000) as usize,
        iat: (now / 1000) as usize,
        sub: user_id.as_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(ctx.config.api_secret.as_bytes()),
    )
    .map_err(|_| DaylineError::InternalError)
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

fn decode_token(api_secret: &str, token: &str) -> anyhow::Result<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(api_secret.as_bytes()),
        &Validation::default(),
    )?
    .claims;

    Ok(claims)
}

pub async fn protect_route(req: &HttpRequest, ctx: &DaylineContext) -> Result<User, DaylineError> {
    let token = match req.headers().get("authorization") {
        Some(token) => match token.to_str() {
            Ok(token) => parse_authtoken_header(token),
            Err(_) => {
                return Err(DaylineError::Unauthorized(
                    "Malformed authorization header provided".into(),
                ))
            }
        },
        None => {
            return Err(DaylineError::Unauthorized(
                "Unable to find authorization header".into(),
            ))
        }
    };
    let claims = match decode_token(&ctx.config.api_secret, &token) {
        Ok(claims) => claims,
        Err(_) => {
            return Err(DaylineError::Unauthorized(
                "Invalid or expired access token provided".into(),
            ))
        }
    };
    let user_id: ID = match claims.sub.parse() {
        Ok(user_id) => user_id,
        Err(_) => {
            return Err(DaylineError::Unauthorized(
                "Invalid or expired access token provided".into(),
            ))
        }
    };

    match ctx.repos.users.find(&user_id).await {
        Some(user) => Ok(user),
        None => Err(DaylineError::Unauthorized(
            "Unable to find user from credentials".into(),
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;

    async fn setup_user(ctx: &DaylineContext) -> User {
        let user = User::new(
            "lena".into(),
            "hash".into(),
            None,
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    fn expired_token(user_id: &ID, api_secret: &str) -> String {
        let claims = Claims {
            exp: 100, // year 1970
            iat: 19,
            sub: user_id.as_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(api_secret.as_bytes()),
        )
        .unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn decodes_valid_token_for_existing_user() {
        let ctx = DaylineContext::create_inmemory();
        let user = setup_user(&ctx).await;
        let token = create_access_token(&user.id, &ctx).unwrap();

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        let res = protect_route(&req, &ctx).await;
        assert!(res.is_ok());
        assert_eq!(res.unwrap().id, user.id);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_expired_token() {
        let ctx = DaylineContext::create_inmemory();
        let user = setup_user(&ctx).await;
        let token = expired_token(&user.id, &ctx.config.api_secret);

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        assert!(protect_route(&req, &ctx).await.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_token_for_unknown_user() {
        let ctx = DaylineContext::create_inmemory();
        let token = create_access_token(&ID::new(), &ctx).unwrap();

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        assert!(protect_route(&req, &ctx).await.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_missing_and_garbage_tokens() {
        let ctx = DaylineContext::create_inmemory();
        setup_user(&ctx).await;

        let req = TestRequest::default().to_http_request();
        assert!(protect_route(&req, &ctx).await.is_err());

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_http_request();
        assert!(protect_route(&req, &ctx).await.is_err());
    }
}
