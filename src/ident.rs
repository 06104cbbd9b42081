use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use uuid::Uuid;

/// Header the upstream gateway sets after authenticating the caller.
/// Session/token mechanics live outside this service.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extracts the authenticated user's id from `x-user-id`.
pub struct UserId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                format!("Missing {USER_ID_HEADER} header"),
            ))?;

        let user_id = raw.parse::<Uuid>().map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                format!("Invalid {USER_ID_HEADER} header"),
            )
        })?;

        Ok(UserId(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(value: Option<&str>) -> Result<Uuid, StatusCode> {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(USER_ID_HEADER, v);
        }
        let request = builder.body(()).expect("request builds");
        let (mut parts, ()) = request.into_parts();
        UserId::from_request_parts(&mut parts, &())
            .await
            .map(|UserId(id)| id)
            .map_err(|(status, _)| status)
    }

    #[tokio::test]
    async fn accepts_a_valid_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(extract(Some(&id.to_string())).await, Ok(id));
    }

    #[tokio::test]
    async fn rejects_missing_and_malformed_headers() {
        assert_eq!(extract(None).await, Err(StatusCode::UNAUTHORIZED));
        assert_eq!(extract(Some("not-a-uuid")).await, Err(StatusCode::UNAUTHORIZED));
    }
}
