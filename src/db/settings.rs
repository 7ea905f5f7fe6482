use sea_orm::*;
use std::collections::{BTreeMap, HashMap};

use crate::models::settings;

/// Fetch the stored value for `key`, if it was ever saved.
pub async fn get_value(db: &DatabaseConnection, key: &str) -> Result<Option<String>, DbErr> {
    Ok(settings::Entity::find_by_id(key.to_string())
        .one(db)
        .await?
        .map(|s| s.value))
}

/// Fetch every stored setting as a key/value map.
pub async fn get_all(db: &DatabaseConnection) -> Result<HashMap<String, String>, DbErr> {
    Ok(settings::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.key, s.value))
        .collect())
}

/// Upsert every entry in one transaction. Returns how many keys were written.
pub async fn upsert_all(
    db: &DatabaseConnection,
    values: BTreeMap<String, String>,
) -> Result<u64, DbErr> {
    let txn = db.begin().await?;

    let result = async {
        let mut written = 0;
        for (key, value) in values {
            let now = chrono::Utc::now();
            match settings::Entity::find_by_id(key.clone()).one(&txn).await? {
                Some(existing) => {
                    let mut active: settings::ActiveModel = existing.into();
                    active.value = Set(value);
                    active.updated_at = Set(now);
                    active.update(&txn).await?;
                }
                None => {
                    settings::ActiveModel {
                        key: Set(key),
                        value: Set(value),
                        updated_at: Set(now),
                    }
                    .insert(&txn)
                    .await?;
                }
            }
            written += 1;
        }
        Ok::<_, DbErr>(written)
    }
    .await;

    match result {
        Ok(written) => {
            txn.commit().await?;
            Ok(written)
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e)
        }
    }
}
