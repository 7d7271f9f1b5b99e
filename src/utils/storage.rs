use serde::{de::DeserializeOwned, Serialize};
use web_sys::{window, Storage};

use crate::error::AppError;

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

pub fn save_to_storage<T: Serialize>(key: &str, value: &T) -> Result<(), AppError> {
    let storage = get_local_storage()
        .ok_or_else(|| AppError::Storage("localStorage inaccessible".to_string()))?;
    let json = serde_json::to_string(value)
        .map_err(|e| AppError::Storage(format!("serialize {}: {}", key, e)))?;
    storage
        .set_item(key, &json)
        .map_err(|_| AppError::Storage(format!("write {} failed", key)))?;
    Ok(())
}

pub fn load_from_storage<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = get_local_storage()?;
    let json = storage.get_item(key).ok()??;
    serde_json::from_str(&json).ok()
}

pub fn remove_from_storage(key: &str) -> Result<(), AppError> {
    let storage = get_local_storage()
        .ok_or_else(|| AppError::Storage("localStorage inaccessible".to_string()))?;
    storage
        .remove_item(key)
        .map_err(|_| AppError::Storage(format!("remove {} failed", key)))?;
    Ok(())
}
