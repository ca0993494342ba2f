//! Database Operations for Listings
//!
//! CRUD for ads, ad images, and categories.

use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::listings::{Ad, AdDetail, AdImage, Category};

/// Create a new ad with its image URLs
///
/// The ad row and its images are inserted in one transaction so a failed
/// image insert never leaves a half-created listing.
pub async fn create_ad(
    pool: &PgPool,
    user_id: Uuid,
    category_id: Uuid,
    title: &str,
    description: &str,
    price: i64,
    location: &str,
    image_urls: &[String],
) -> Result<AdDetail, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = chrono::Utc::now();

    let mut tx = pool.begin().await?;

    let ad = sqlx::query_as::<_, Ad>(
        r#"
        INSERT INTO ads (id, user_id, category_id, title, description, price, location, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, user_id, category_id, title, description, price, location, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(category_id)
    .bind(title)
    .bind(description)
    .bind(price)
    .bind(location)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let mut images = Vec::with_capacity(image_urls.len());
    for url in image_urls {
        let image = sqlx::query_as::<_, AdImage>(
            r#"
            INSERT INTO ad_images (id, ad_id, url)
            VALUES ($1, $2, $3)
            RETURNING id, ad_id, url
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(id)
        .bind(url)
        .fetch_one(&mut *tx)
        .await?;
        images.push(image);
    }

    tx.commit().await?;

    Ok(AdDetail { ad, images })
}

/// Get an ad with its images
pub async fn get_ad_detail(pool: &PgPool, ad_id: Uuid) -> Result<Option<AdDetail>, sqlx::Error> {
    let ad = sqlx::query_as::<_, Ad>(
        r#"
        SELECT id, user_id, category_id, title, description, price, location, created_at
        FROM ads
        WHERE id = $1
        "#,
    )
    .bind(ad_id)
    .fetch_optional(pool)
    .await?;

    let Some(ad) = ad else {
        return Ok(None);
    };

    let images = sqlx::query_as::<_, AdImage>(
        r#"
        SELECT id, ad_id, url
        FROM ad_images
        WHERE ad_id = $1
        ORDER BY id
        "#,
    )
    .bind(ad_id)
    .fetch_all(pool)
    .await?;

    Ok(Some(AdDetail { ad, images }))
}

/// Get all ads owned by a user, newest first
pub async fn get_ads_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Ad>, sqlx::Error> {
    sqlx::query_as::<_, Ad>(
        r#"
        SELECT id, user_id, category_id, title, description, price, location, created_at
        FROM ads
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Get all categories, name-ordered
pub async fn get_categories(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name
        FROM categories
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Check whether a category exists
pub async fn category_exists(pool: &PgPool, category_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM categories WHERE id = $1
        "#,
    )
    .bind(category_id)
    .fetch_one(pool)
    .await?;

    Ok(row > 0)
}
