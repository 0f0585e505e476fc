//! User/profile reads used by the signal generator (Section 4.E/4.G).

use sqlx::PgPool;

use crate::error::RadarResult;

use super::models::UserProfile;

pub async fn active_profiles(pool: &PgPool) -> RadarResult<Vec<UserProfile>> {
    let rows = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT p.* FROM user_profiles p
        JOIN users u ON u.id = p.user_id
        WHERE u.is_active = true
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
