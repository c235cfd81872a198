//! PostgreSQL implementation of the UserRepository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::user::{
    ActivityLevel, ExperienceLevel, FitnessGoal, Gender, PreferredTime, ScheduleSlot, Units, User,
};
use crate::ports::UserRepository;

/// Postgres-backed user accounts and weekly schedules.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    phone: Option<String>,
    phone_country_code: Option<String>,
    email: Option<String>,
    email_verified: bool,
    password_hash: Option<String>,
    name: Option<String>,
    age: Option<i32>,
    weight_kg: Option<f32>,
    height_cm: Option<f32>,
    gender: Option<String>,
    fitness_goal: Option<String>,
    experience_level: Option<String>,
    activity_level: Option<String>,
    gym_access: bool,
    home_equipment: Vec<String>,
    medical_conditions_encrypted: Option<String>,
    injuries: Vec<String>,
    preferred_language: String,
    units: String,
    profile_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::from_uuid(row.id),
            phone: row.phone,
            phone_country_code: row.phone_country_code,
            email: row.email,
            email_verified: row.email_verified,
            password_hash: row.password_hash,
            name: row.name,
            age: row.age.map(|a| a.max(0) as u32),
            weight_kg: row.weight_kg,
            height_cm: row.height_cm,
            gender: row.gender.as_deref().map(parse_enum::<Gender>).transpose()?,
            fitness_goal: row
                .fitness_goal
                .as_deref()
                .map(parse_enum::<FitnessGoal>)
                .transpose()?,
            experience_level: row
                .experience_level
                .as_deref()
                .map(parse_enum::<ExperienceLevel>)
                .transpose()?,
            activity_level: row
                .activity_level
                .as_deref()
                .map(parse_enum::<ActivityLevel>)
                .transpose()?,
            gym_access: row.gym_access,
            home_equipment: row.home_equipment,
            medical_conditions_encrypted: row.medical_conditions_encrypted,
            injuries: row.injuries,
            preferred_language: row.preferred_language,
            units: parse_enum::<Units>(&row.units)?,
            profile_completed: row.profile_completed,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

/// Parses a snake_case column value into a serde-renamed enum.
fn parse_enum<T: serde::de::DeserializeOwned>(value: &str) -> Result<T, DomainError> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|e| DomainError::database(format!("invalid enum value '{}': {}", value, e)))
}

/// Serializes a serde-renamed enum into its snake_case column value.
fn enum_to_string<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

const USER_COLUMNS: &str = r#"
    id, phone, phone_country_code, email, email_verified, password_hash,
    name, age, weight_kg, height_cm, gender, fitness_goal, experience_level,
    activity_level, gym_access, home_equipment, medical_conditions_encrypted,
    injuries, preferred_language, units, profile_completed, created_at, updated_at
"#;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, phone, phone_country_code, email, email_verified, password_hash,
                name, age, weight_kg, height_cm, gender, fitness_goal, experience_level,
                activity_level, gym_access, home_equipment, medical_conditions_encrypted,
                injuries, preferred_language, units, profile_completed, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                $17, $18, $19, $20, $21, $22, $23
            )
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.phone)
        .bind(&user.phone_country_code)
        .bind(&user.email)
        .bind(user.email_verified)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.age.map(|a| a as i32))
        .bind(user.weight_kg)
        .bind(user.height_cm)
        .bind(user.gender.as_ref().map(enum_to_string))
        .bind(user.fitness_goal.as_ref().map(enum_to_string))
        .bind(user.experience_level.as_ref().map(enum_to_string))
        .bind(user.activity_level.as_ref().map(enum_to_string))
        .bind(user.gym_access)
        .bind(&user.home_equipment)
        .bind(&user.medical_conditions_encrypted)
        .bind(&user.injuries)
        .bind(&user.preferred_language)
        .bind(enum_to_string(&user.units))
        .bind(user.profile_completed)
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                phone = $2, phone_country_code = $3, email = $4, email_verified = $5,
                password_hash = $6, name = $7, age = $8, weight_kg = $9, height_cm = $10,
                gender = $11, fitness_goal = $12, experience_level = $13, activity_level = $14,
                gym_access = $15, home_equipment = $16, medical_conditions_encrypted = $17,
                injuries = $18, preferred_language = $19, units = $20, profile_completed = $21,
                updated_at = $22
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.phone)
        .bind(&user.phone_country_code)
        .bind(&user.email)
        .bind(user.email_verified)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.age.map(|a| a as i32))
        .bind(user.weight_kg)
        .bind(user.height_cm)
        .bind(user.gender.as_ref().map(enum_to_string))
        .bind(user.fitness_goal.as_ref().map(enum_to_string))
        .bind(user.experience_level.as_ref().map(enum_to_string))
        .bind(user.activity_level.as_ref().map(enum_to_string))
        .bind(user.gym_access)
        .bind(&user.home_equipment)
        .bind(&user.medical_conditions_encrypted)
        .bind(&user.injuries)
        .bind(&user.preferred_language)
        .bind(enum_to_string(&user.units))
        .bind(user.profile_completed)
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                crate::domain::foundation::ErrorCode::UserNotFound,
                "User not found",
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE phone = $1",
            USER_COLUMNS
        ))
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.map(User::try_from).transpose()
    }

    async fn weekly_schedule(&self, user_id: &UserId) -> Result<Vec<ScheduleSlot>, DomainError> {
        #[derive(sqlx::FromRow)]
        struct SlotRow {
            day_of_week: i16,
            available: bool,
            preferred_time: Option<String>,
            duration_minutes: Option<i32>,
        }

        let rows: Vec<SlotRow> = sqlx::query_as(
            r#"
            SELECT day_of_week, available, preferred_time, duration_minutes
            FROM weekly_schedules
            WHERE user_id = $1
            ORDER BY day_of_week
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        rows.into_iter()
            .map(|row| {
                let preferred_time = row
                    .preferred_time
                    .as_deref()
                    .map(parse_enum::<PreferredTime>)
                    .transpose()?;
                ScheduleSlot::new(
                    row.day_of_week.clamp(0, 6) as u8,
                    row.available,
                    preferred_time,
                    row.duration_minutes.map(|d| d.max(0) as u32),
                )
                .map_err(DomainError::from)
            })
            .collect()
    }

    async fn replace_weekly_schedule(
        &self,
        user_id: &UserId,
        slots: &[ScheduleSlot],
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(DomainError::database)?;

        sqlx::query("DELETE FROM weekly_schedules WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(DomainError::database)?;

        for slot in slots {
            sqlx::query(
                r#"
                INSERT INTO weekly_schedules (
                    id, user_id, day_of_week, available, preferred_time, duration_minutes
                ) VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(user_id.as_uuid())
            .bind(slot.day_of_week as i16)
            .bind(slot.available)
            .bind(slot.preferred_time.as_ref().map(enum_to_string))
            .bind(slot.duration_minutes.map(|d| d as i32))
            .execute(&mut *tx)
            .await
            .map_err(DomainError::database)?;
        }

        tx.commit().await.map_err(DomainError::database)?;
        Ok(())
    }
}
