//! Airdrop configuration with TOML file support.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sigdrop_types::{Address, ChainId};
use sigdrop_verifier::{DigestBuilder, Eip712Domain, SchemeKind};

use crate::error::ConfigError;

/// Immutable parameters of one airdrop deployment.
///
/// Can be loaded from a TOML file via [`AirdropConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Amounts may be written as TOML
/// integers or as decimal strings for values beyond `i64`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirdropConfig {
    /// The only identity whose signatures authorize claims.
    pub trusted_signer: Address,

    /// Address of the mintable token this airdrop distributes.
    pub token: Address,

    /// Lifetime total claimable.
    #[serde(with = "amount")]
    pub max_supply: u128,

    /// Upper bound on a single claim.
    #[serde(with = "amount")]
    pub max_per_claim: u128,

    #[serde(default)]
    pub scheme: SchemeConfig,
}

/// Which digest scheme a deployment accepts.
///
/// The TypedData domain's verifying contract is always the engine's own
/// address and is filled in at construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemeConfig {
    #[default]
    PersonalSign,
    TypedData {
        #[serde(default = "default_domain_name")]
        name: String,
        #[serde(default = "default_domain_version")]
        version: String,
        #[serde(default = "default_chain_id")]
        chain_id: ChainId,
    },
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_domain_name() -> String {
    "ProtocolAirdrop".to_string()
}

fn default_domain_version() -> String {
    "1".to_string()
}

fn default_chain_id() -> ChainId {
    ChainId::MAINNET
}

mod amount {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u64),
            Str(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Ok(u128::from(n)),
            Raw::Str(s) => s.replace('_', "").parse().map_err(D::Error::custom),
        }
    }
}

// ── Impl ───────────────────────────────────────────────────────────────

impl SchemeConfig {
    /// TypedData with the default name, version and chain id.
    pub fn typed_data() -> Self {
        Self::TypedData {
            name: default_domain_name(),
            version: default_domain_version(),
            chain_id: default_chain_id(),
        }
    }

    pub fn kind(&self) -> SchemeKind {
        match self {
            Self::PersonalSign => SchemeKind::PersonalSign,
            Self::TypedData { .. } => SchemeKind::TypedData,
        }
    }

    /// The digest builder for a deployment living at `engine_address`.
    pub fn digest_builder(&self, engine_address: Address) -> DigestBuilder {
        match self {
            Self::PersonalSign => DigestBuilder::personal_sign(),
            Self::TypedData {
                name,
                version,
                chain_id,
            } => DigestBuilder::typed_data(Eip712Domain::new(
                name.clone(),
                version.clone(),
                *chain_id,
                engine_address,
            )),
        }
    }
}

impl AirdropConfig {
    pub fn new(
        trusted_signer: Address,
        token: Address,
        max_supply: u128,
        max_per_claim: u128,
        scheme: SchemeConfig,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            trusted_signer,
            token,
            max_supply,
            max_per_claim,
            scheme,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_per_claim > self.max_supply {
            return Err(ConfigError::PerClaimCapExceedsSupply {
                max_per_claim: self.max_per_claim,
                max_supply: self.max_supply,
            });
        }
        if self.trusted_signer.is_zero() {
            return Err(ConfigError::ZeroTrustedSigner);
        }
        if self.token.is_zero() {
            return Err(ConfigError::ZeroToken);
        }
        Ok(())
    }

    /// Load and validate configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNER: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
    const TOKEN: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

    #[test]
    fn minimal_toml_uses_defaults() {
        let toml = format!(
            r#"
            trusted_signer = "{SIGNER}"
            token = "{TOKEN}"
            max_supply = 4
            max_per_claim = 2
        "#
        );
        let config = AirdropConfig::from_toml_str(&toml).expect("should parse");
        assert_eq!(config.max_supply, 4);
        assert_eq!(config.max_per_claim, 2);
        assert_eq!(config.scheme, SchemeConfig::PersonalSign);
        assert_eq!(config.trusted_signer.to_string(), SIGNER);
    }

    #[test]
    fn typed_data_defaults() {
        let toml = format!(
            r#"
            trusted_signer = "{SIGNER}"
            token = "{TOKEN}"
            max_supply = 10
            max_per_claim = 2

            [scheme]
            kind = "typed_data"
            chain_id = 31337
        "#
        );
        let config = AirdropConfig::from_toml_str(&toml).expect("should parse");
        assert_eq!(
            config.scheme,
            SchemeConfig::TypedData {
                name: "ProtocolAirdrop".into(),
                version: "1".into(),
                chain_id: ChainId::HARDHAT,
            }
        );
        assert_eq!(config.scheme.kind(), SchemeKind::TypedData);
    }

    #[test]
    fn large_amounts_as_strings() {
        let toml = format!(
            r#"
            trusted_signer = "{SIGNER}"
            token = "{TOKEN}"
            max_supply = "1_000_000_000_000_000_000_000_000"
            max_per_claim = "1000000000000000000"
        "#
        );
        let config = AirdropConfig::from_toml_str(&toml).expect("should parse");
        assert_eq!(config.max_supply, 10u128.pow(24));
        assert_eq!(config.max_per_claim, 10u128.pow(18));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = AirdropConfig::new(
            SIGNER.parse().unwrap(),
            TOKEN.parse().unwrap(),
            u128::MAX,
            7,
            SchemeConfig::typed_data(),
        )
        .unwrap();
        let text = config.to_toml_string().unwrap();
        assert_eq!(AirdropConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn per_claim_cap_above_supply_rejected() {
        let err = AirdropConfig::new(
            SIGNER.parse().unwrap(),
            TOKEN.parse().unwrap(),
            4,
            5,
            SchemeConfig::PersonalSign,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::PerClaimCapExceedsSupply {
                max_per_claim: 5,
                max_supply: 4
            }
        ));
    }

    #[test]
    fn zero_signer_rejected() {
        let err = AirdropConfig::new(
            Address::ZERO,
            TOKEN.parse().unwrap(),
            4,
            2,
            SchemeConfig::PersonalSign,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTrustedSigner));
    }

    #[test]
    fn malformed_toml_rejected() {
        assert!(matches!(
            AirdropConfig::from_toml_str("max_supply = \"lots\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn typed_data_builder_binds_engine_address() {
        let engine = Address::new([0xEE; 20]);
        let builder = SchemeConfig::typed_data().digest_builder(engine);
        assert_eq!(
            builder.domain().map(|d| d.verifying_contract),
            Some(engine)
        );
    }
}
