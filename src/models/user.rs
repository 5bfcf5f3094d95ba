use sqlx::FromRow;

// Аутентификация живёт выше по стеку; здесь только identity-запись
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
}

impl User {
    // Найти активного пользователя по id
    pub async fn find_active(
        id: i64,
        db: &crate::database::Database,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND is_active = true")
            .bind(id)
            .fetch_optional(&db.pool)
            .await
    }
}
