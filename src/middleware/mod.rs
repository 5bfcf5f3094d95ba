use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use std::sync::Arc;

use crate::models::User;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

// Identity extractor. Аутентификация выполняется выше по стеку (gateway);
// сюда приходит уже проверенный пользователь в заголовке X-User-Id, здесь
// он только резолвится в запись users.
impl FromRequestParts<Arc<crate::AppState>> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        // Получаем заголовок X-User-Id
        let user_id: i64 = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        // Пользователь должен существовать и быть активным
        let user = User::find_active(user_id, &state.db)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        })
    }
}
