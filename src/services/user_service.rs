// ==================== USERS ====================
// Orquestração entre os handlers HTTP e o UserStore

use crate::{
    database::UserStore,
    models::{NewUser, User, UserRecord},
    utils::error::AppError,
};

/// POST /api/users - Cria um usuário com o próximo id disponível
pub async fn create_user(store: &dyn UserStore, request: NewUser) -> Result<User, AppError> {
    let user = store.append(request).await?;
    log::info!("👤 Created user {}", user.id);
    Ok(user)
}

/// GET /api/users - Coleção completa na ordem de gravação, registros sem id inteiro incluídos
pub async fn list_users(store: &dyn UserStore) -> Result<Vec<UserRecord>, AppError> {
    store.list().await
}

/// GET /api/users/{id}
///
/// `raw_id` is the path segment as received. Anything that is not a
/// non-negative integer matches no user and yields `NotFound`.
pub async fn find_user(store: &dyn UserStore, raw_id: &str) -> Result<User, AppError> {
    let Some(id) = parse_user_id(raw_id) else {
        log::debug!("🔎 User id {:?} is not numeric", raw_id);
        return Err(AppError::NotFound(raw_id.to_string()));
    };

    store
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(raw_id.to_string()))
}

/// Accepts `"2"`, `" 2 "` and `"2.0"`; rejects fractions, negatives and text.
fn parse_user_id(raw_id: &str) -> Option<u64> {
    let trimmed = raw_id.trim();
    if let Ok(id) = trimmed.parse::<u64>() {
        return Some(id);
    }

    let number = trimmed.parse::<f64>().ok()?;
    if number.is_finite() && number >= 0.0 && number.fract() == 0.0 && number <= u64::MAX as f64 {
        Some(number as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{IdStrategy, JsonFileStore};
    use serde_json::Map;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("2"), Some(2));
        assert_eq!(parse_user_id(" 3 "), Some(3));
        assert_eq!(parse_user_id("4.0"), Some(4));
        assert_eq!(parse_user_id("4.5"), None);
        assert_eq!(parse_user_id("-1"), None);
        assert_eq!(parse_user_id("abc"), None);
        assert_eq!(parse_user_id("NaN"), None);
        assert_eq!(parse_user_id(""), None);
    }

    #[tokio::test]
    async fn test_find_user_not_found_carries_raw_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, r#"[{"id":1,"name":"A"}]"#).unwrap();
        let store = JsonFileStore::new(path, IdStrategy::CollectionLength);

        assert_eq!(find_user(&store, "1").await.unwrap().id, 1);
        match find_user(&store, "abc").await {
            Err(AppError::NotFound(id)) => assert_eq!(id, "abc"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_sequential_creates_grow_by_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "[]").unwrap();
        let store = JsonFileStore::new(path, IdStrategy::CollectionLength);

        for expected in 1..=5u64 {
            let before = list_users(&store).await.unwrap().len() as u64;
            let user = create_user(&store, NewUser(Map::new())).await.unwrap();
            assert_eq!(user.id, before + 1);
            assert_eq!(user.id, expected);
        }
        assert_eq!(list_users(&store).await.unwrap().len(), 5);
    }
}
