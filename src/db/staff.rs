use sqlx::PgPool;
use uuid::Uuid;

use crate::models::StaffRow;

/// Runs `autenticar_funcionario`. An empty result means the credentials did not match.
pub async fn authenticate(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<Option<StaffRow>, sqlx::Error> {
    sqlx::query_as::<_, StaffRow>(
        "SELECT id, nome, email, funcao, ativo, foto_url, telefone
         FROM autenticar_funcionario($1, $2)",
    )
    .bind(email)
    .bind(password)
    .fetch_optional(pool)
    .await
}

/// Runs `criar_login_funcionario`, which (re)binds a credential to the staff id.
pub async fn set_credential(
    pool: &PgPool,
    id: Uuid,
    email: &str,
    password: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT criar_login_funcionario($1, $2, $3)")
        .bind(id)
        .bind(email)
        .bind(password)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<StaffRow>, sqlx::Error> {
    sqlx::query_as::<_, StaffRow>(
        "SELECT id, nome, email, funcao, ativo, foto_url, telefone
         FROM funcionarios WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Returns the number of rows touched; zero means the staff id does not exist.
pub async fn update_photo_url(
    pool: &PgPool,
    id: Uuid,
    photo_url: Option<&str>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE funcionarios SET foto_url = $2 WHERE id = $1")
        .bind(id)
        .bind(photo_url)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
