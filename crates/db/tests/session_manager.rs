//! Integration tests for the session entity manager.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use sesiones_core::error::CoreError;
use sesiones_core::filter::DateRange;
use sesiones_db::error::DbError;
use sesiones_db::models::session::{CreateSession, SessionFilter};
use sesiones_db::models::session_date::CreateSessionDate;
use sesiones_db::models::session_funding::CreateSessionFundingSource;
use sesiones_db::repositories::{SessionDateRepo, SessionFundingRepo, SessionRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_session(id_ente: &str, fecha: NaiveDate) -> CreateSession {
    CreateSession {
        id_ente: id_ente.to_string(),
        id_usuario: 7,
        oficio_o_acta_numero: "OF-1".to_string(),
        asunto: "Revisión".to_string(),
        fecha,
        id_servidor_publico: None,
        modo_sesion: None,
        comite: None,
        id_clasificacion_licitacion: None,
        activo: true,
    }
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_full_record(pool: PgPool) {
    let input = CreateSession {
        id_servidor_publico: Some(1),
        modo_sesion: Some("VIRTUAL".into()),
        comite: Some("ORDINARIA".into()),
        id_clasificacion_licitacion: Some(2),
        ..new_session("E1", ymd(2024, 5, 1))
    };
    let session = SessionRepo::create(&pool, &input).await.unwrap();

    assert!(session.id > 0);
    assert_eq!(session.id_ente, "E1");
    assert_eq!(session.modo_sesion.as_deref(), Some("VIRTUAL"));
    assert_eq!(session.comite.as_deref(), Some("ORDINARIA"));
    assert!(session.activo);
    assert!(session.creado_en.is_some());

    assert_eq!(SessionRepo::get(&pool, session.id).await.unwrap(), session);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_entity_reference_is_rolled_back(pool: PgPool) {
    let err = SessionRepo::create(&pool, &new_session("NOPE", ymd(2024, 5, 1)))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Database(sqlx::Error::Database(ref db)) if db.code().as_deref() == Some("23503"));

    let all = SessionRepo::list(&pool, &SessionFilter::default()).await.unwrap();
    assert!(all.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_enum_value_rejected_before_persistence(pool: PgPool) {
    let input = CreateSession {
        modo_sesion: Some("REMOTA".into()),
        ..new_session("E1", ymd(2024, 5, 1))
    };
    let err = SessionRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation { ref field, .. }) if field == "modo_sesion");
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn filters_are_independent(pool: PgPool) {
    let e1 = SessionRepo::create(&pool, &new_session("E1", ymd(2024, 5, 1)))
        .await
        .unwrap();
    let e2 = SessionRepo::create(
        &pool,
        &CreateSession {
            id_servidor_publico: Some(2),
            ..new_session("E2", ymd(2024, 6, 15))
        },
    )
    .await
    .unwrap();

    let all = SessionRepo::list(&pool, &SessionFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let by_ente = SessionRepo::list(
        &pool,
        &SessionFilter {
            id_ente: Some("E1".into()),
            ..SessionFilter::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_ente, vec![e1.clone()]);

    let by_servant = SessionRepo::list(
        &pool,
        &SessionFilter {
            id_servidor_publico: Some(2),
            ..SessionFilter::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_servant, vec![e2.clone()]);

    let june = SessionRepo::list(
        &pool,
        &SessionFilter {
            fechas: DateRange {
                from: Some(ymd(2024, 6, 1)),
                to: Some(ymd(2024, 6, 30)),
            },
            ..SessionFilter::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(june, vec![e2]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inverted_date_range_is_invalid_argument(pool: PgPool) {
    let err = SessionRepo::list(
        &pool,
        &SessionFilter {
            fechas: DateRange {
                from: Some(ymd(2024, 6, 30)),
                to: Some(ymd(2024, 6, 1)),
            },
            ..SessionFilter::default()
        },
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvalidArgument(_)));
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_can_deactivate(pool: PgPool) {
    let session = SessionRepo::create(&pool, &new_session("E1", ymd(2024, 5, 1)))
        .await
        .unwrap();

    let changes = CreateSession {
        activo: false,
        ..new_session("E1", ymd(2024, 5, 1))
    };
    let affected = SessionRepo::update(&pool, session.id, &changes).await.unwrap();
    assert_eq!(affected, 1);

    let reread = SessionRepo::get(&pool, session.id).await.unwrap();
    assert!(!reread.activo);
    assert_eq!(reread.creado_en, session.creado_en);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_unknown_session_is_not_found(pool: PgPool) {
    let err = SessionRepo::delete(&pool, 999_999).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::NotFound { entity: "Session", .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_cascades_to_dates_and_links(pool: PgPool) {
    let session = SessionRepo::create(&pool, &new_session("E1", ymd(2024, 5, 1)))
        .await
        .unwrap();
    SessionDateRepo::create(
        &pool,
        &CreateSessionDate {
            id_calendario_sesiones: session.id,
            fecha: ymd(2024, 5, 2),
            hora: chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            activo: true,
        },
    )
    .await
    .unwrap();
    SessionFundingRepo::create(
        &pool,
        &CreateSessionFundingSource {
            id_calendario_sesiones: session.id,
            id_fuente_financiamiento: 1,
        },
    )
    .await
    .unwrap();

    assert_eq!(SessionRepo::delete(&pool, session.id).await.unwrap(), 1);

    assert!(SessionDateRepo::list_by_session(&pool, session.id)
        .await
        .unwrap()
        .is_empty());
    assert!(SessionFundingRepo::list_by_session(&pool, session.id)
        .await
        .unwrap()
        .is_empty());
}
