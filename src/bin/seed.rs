//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` environment variable (reads .env).

use sqlx::PgPool;
use strokeguard::models::assessment::{
    Gender, PatientRecord, ResidenceType, SmokingStatus, WorkType,
};
use strokeguard::services::risk;
use uuid::Uuid;

const ADMIN_PASSWORD: &str = "Admin123!";
const PATIENT_PASSWORD: &str = "Patient123!";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Run migrations first
    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== StrokeGuard Seed Script ===");

    seed_admin_user(&pool).await?;
    let patient_id = seed_patient_user(&pool).await?;
    seed_assessments(&pool, patient_id).await?;
    seed_announcement(&pool).await?;

    println!("\n=== Seed complete! ===");
    println!("Admin login: admin / {ADMIN_PASSWORD}");
    println!("Patient login: jdoe / {PATIENT_PASSWORD}");

    Ok(())
}

async fn seed_admin_user(pool: &PgPool) -> anyhow::Result<()> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = 'admin')")
            .fetch_one(pool)
            .await?;

    let hash = strokeguard::services::auth::hash_password(ADMIN_PASSWORD)?;

    if exists {
        // Update password for existing admin user
        sqlx::query("UPDATE users SET password_hash = $1 WHERE username = 'admin'")
            .bind(&hash)
            .execute(pool)
            .await?;
        println!("[done] Updated admin password");
        return Ok(());
    }

    sqlx::query(
        "INSERT INTO users (username, email, password_hash, full_name, role)
         VALUES ('admin', 'admin@strokeguard.local', $1, 'Platform Administrator', 'Admin')",
    )
    .bind(&hash)
    .execute(pool)
    .await?;

    println!("[done] Created admin user");
    Ok(())
}

async fn seed_patient_user(pool: &PgPool) -> anyhow::Result<Uuid> {
    if let Some(id) = sqlx::query_scalar("SELECT id FROM users WHERE username = 'jdoe'")
        .fetch_optional(pool)
        .await?
    {
        println!("[skip] Patient user already exists");
        return Ok(id);
    }

    let hash = strokeguard::services::auth::hash_password(PATIENT_PASSWORD)?;
    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash, full_name, date_of_birth, phone, role)
         VALUES ('jdoe', 'jdoe@example.com', $1, 'Jordan Doe', '1958-03-14', '555-0142', 'Patient')
         RETURNING id",
    )
    .bind(&hash)
    .fetch_one(pool)
    .await?;

    println!("[done] Created patient user");
    Ok(id)
}

async fn seed_assessments(pool: &PgPool, patient_id: Uuid) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assessments WHERE user_id = $1")
        .bind(patient_id)
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Assessments already exist ({count})");
        return Ok(());
    }

    let records = vec![
        PatientRecord {
            age: Some(67),
            gender: Some(Gender::Male),
            hypertension: Some(true),
            heart_disease: Some(false),
            ever_married: Some("Yes".to_string()),
            work_type: Some(WorkType::Private),
            residence_type: Some(ResidenceType::Urban),
            avg_glucose_level: Some(142.0),
            bmi: Some(31.2),
            smoking_status: Some(SmokingStatus::FormerlySmoked),
        },
        PatientRecord {
            age: Some(68),
            gender: Some(Gender::Male),
            hypertension: Some(true),
            heart_disease: Some(true),
            ever_married: Some("Yes".to_string()),
            work_type: Some(WorkType::Private),
            residence_type: Some(ResidenceType::Urban),
            avg_glucose_level: Some(188.0),
            bmi: Some(33.5),
            smoking_status: Some(SmokingStatus::FormerlySmoked),
        },
    ];

    for (i, record) in records.iter().enumerate() {
        let result = risk::assess(record);
        let patient_ref = format!("patient_2025010{}120000", i + 1);
        sqlx::query(
            r#"
            INSERT INTO assessments (
                user_id, patient_ref, age, gender, hypertension, heart_disease,
                ever_married, work_type, residence_type, avg_glucose_level, bmi,
                smoking_status, risk_score, risk_level, risk_factors,
                recommendations, confidence
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(patient_id)
        .bind(&patient_ref)
        .bind(record.age)
        .bind(record.gender)
        .bind(record.hypertension)
        .bind(record.heart_disease)
        .bind(&record.ever_married)
        .bind(record.work_type)
        .bind(record.residence_type)
        .bind(record.avg_glucose_level)
        .bind(record.bmi)
        .bind(record.smoking_status)
        .bind(result.risk_score)
        .bind(result.risk_level)
        .bind(serde_json::to_value(&result.risk_factors)?)
        .bind(serde_json::to_value(&result.recommendations)?)
        .bind(result.confidence)
        .execute(pool)
        .await?;
    }

    println!("[done] Created 2 sample assessments");
    Ok(())
}

async fn seed_announcement(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM announcements")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Announcements already exist ({count})");
        return Ok(());
    }

    let admin_id: Uuid = sqlx::query_scalar("SELECT id FROM users WHERE username = 'admin'")
        .fetch_one(pool)
        .await?;

    sqlx::query(
        "INSERT INTO announcements (title, content, kind, created_by)
         VALUES ('Welcome to StrokeGuard',
                 'Complete your first stroke risk assessment from the dashboard.',
                 'info', $1)",
    )
    .bind(admin_id)
    .execute(pool)
    .await?;

    println!("[done] Created welcome announcement");
    Ok(())
}
