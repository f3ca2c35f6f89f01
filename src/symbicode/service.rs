use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::{Sqlite, Transaction};
use uuid::Uuid;

use crate::db::SmartExecutor;

use super::error::SymbicodeError;
use super::models::Symbicode;
use super::repository::SymbicodeRepository;

pub struct SymbicodeService<'a> {
    repo: SymbicodeRepository<'a>,
}

impl<'a> SymbicodeService<'a> {
    pub fn new(executor: &'a SmartExecutor<'a>) -> Self {
        Self {
            repo: SymbicodeRepository::new(executor),
        }
    }

    /// Mints and persists a symbicode inside the caller's transaction. Only
    /// called from the winner branch of the payment-confirmation commit, so
    /// generation and persistence never observe a partial stock claim.
    pub async fn generate_tx(
        tx: &mut Transaction<'_, Sqlite>,
        product_id: i64,
        order_id: Option<i64>,
    ) -> Result<(Uuid, String), SymbicodeError> {
        let code = Uuid::now_v7();
        let secret_key = generate_secret_key();
        SymbicodeRepository::create_tx(tx, &code, &secret_key, product_id, order_id).await?;
        Ok((code, secret_key))
    }

    pub async fn verify(
        &self,
        code_str: &str,
        activated_ip: Option<&str>,
    ) -> Result<(Symbicode, bool), SymbicodeError> {
        let code_str = code_str.trim();
        let code = Uuid::parse_str(code_str).map_err(|_| SymbicodeError::InvalidFormat)?;

        let symbicode = self.repo.get_by_code(&code).await?;

        // The pre-write read of `is_activated` is only a hint; two
        // concurrent callers can both observe `false` here. The CAS result
        // from `activate` (whether this call's own update matched a row) is
        // the only authoritative signal for which caller was first.
        if !symbicode.is_activated {
            let is_first = self.repo.activate(symbicode.id, activated_ip).await?;
            let refreshed = self.repo.get_by_code(&code).await?;
            return Ok((refreshed, is_first));
        }

        Ok((symbicode, false))
    }

    pub async fn sweep_stale(&self, older_than_days: i64) -> Result<u64, SymbicodeError> {
        self.repo.sweep_stale_unactivated(older_than_days).await
    }
}

fn generate_secret_key() -> String {
    let mut random_bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut random_bytes);
    let hash = Sha256::digest(random_bytes);
    hex::encode(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_key_is_64_hex_chars() {
        let key = generate_secret_key();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
