//! Subcommand implementations. Each returns the text printed on stdout.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Serialize;
use sigdrop_crypto::{generate_keypair, to_checksum};
use sigdrop_engine::{AirdropConfig, SchemeConfig};
use sigdrop_types::{Address, ChainId, PrivateKey};
use sigdrop_verifier::{ClaimIssuer, DigestBuilder, Eip712Domain, SchemeKind, SignatureVerifier};

/// Hex private key as given on the command line or in `SIGDROP_SIGNER_KEY`.
pub struct KeySource(pub String);

impl KeySource {
    fn load(&self) -> anyhow::Result<PrivateKey> {
        PrivateKey::from_hex(self.0.trim()).context("invalid private key hex")
    }
}

/// Where the digest scheme comes from: a config file, or explicit flags.
pub struct SchemeSource {
    pub config: Option<PathBuf>,
    pub scheme: String,
    pub engine: Option<Address>,
    pub chain_id: u64,
    pub domain_name: String,
    pub domain_version: String,
}

impl SchemeSource {
    /// The digest builder, plus the loaded config when one was given.
    fn resolve(&self) -> anyhow::Result<(DigestBuilder, Option<AirdropConfig>)> {
        if let Some(path) = &self.config {
            let config = load_config(path)?;
            let builder = match (&config.scheme, self.engine) {
                (SchemeConfig::PersonalSign, _) => DigestBuilder::personal_sign(),
                (scheme, Some(engine)) => scheme.digest_builder(engine),
                (_, None) => bail!("typed_data scheme requires --engine"),
            };
            return Ok((builder, Some(config)));
        }

        let kind: SchemeKind = self.scheme.parse().map_err(anyhow::Error::msg)?;
        let builder = match kind {
            SchemeKind::PersonalSign => DigestBuilder::personal_sign(),
            SchemeKind::TypedData => {
                let Some(engine) = self.engine else {
                    bail!("typed_data scheme requires --engine");
                };
                DigestBuilder::typed_data(Eip712Domain::new(
                    self.domain_name.clone(),
                    self.domain_version.clone(),
                    ChainId(self.chain_id),
                    engine,
                ))
            }
        };
        Ok((builder, None))
    }
}

fn load_config(path: &Path) -> anyhow::Result<AirdropConfig> {
    let config = AirdropConfig::from_toml_file(path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    tracing::info!(path = %path.display(), scheme = %config.scheme.kind(), "loaded airdrop config");
    Ok(config)
}

#[derive(Serialize)]
struct KeygenOutput {
    address: String,
    private_key: String,
}

pub fn keygen(json: bool) -> anyhow::Result<String> {
    let kp = generate_keypair().context("key generation failed")?;
    let out = KeygenOutput {
        address: to_checksum(&kp.address),
        private_key: format!("0x{}", hex::encode(kp.private.0)),
    };
    if json {
        return Ok(serde_json::to_string_pretty(&out)?);
    }
    Ok(format!("address:     {}\nprivate_key: {}", out.address, out.private_key))
}

pub fn address(key: &KeySource) -> anyhow::Result<String> {
    let address = sigdrop_crypto::address_from_private(&key.load()?)?;
    Ok(to_checksum(&address))
}

pub fn sign(
    key: &KeySource,
    claimant: Address,
    amount: u128,
    scheme: &SchemeSource,
    json: bool,
) -> anyhow::Result<String> {
    let (builder, config) = scheme.resolve()?;
    let issuer = ClaimIssuer::new(key.load()?, builder)?;
    if let Some(config) = &config {
        if issuer.address() != config.trusted_signer {
            tracing::warn!(
                signer = %issuer.address(),
                trusted_signer = %config.trusted_signer,
                "signing key is not the configured trusted signer"
            );
        }
        if amount > config.max_per_claim {
            tracing::warn!(amount, cap = config.max_per_claim, "amount exceeds per-claim cap");
        }
    }
    let request = issuer.issue(claimant, amount)?;
    tracing::debug!(%claimant, amount, scheme = %issuer.digest_builder().scheme(), "signed claim");
    if json {
        return Ok(serde_json::to_string_pretty(&request)?);
    }
    Ok(format!("0x{}", hex::encode(&request.signature)))
}

pub fn recover(
    claimant: Address,
    amount: u128,
    signature: &str,
    scheme: &SchemeSource,
) -> anyhow::Result<String> {
    let bytes = hex::decode(signature.trim().trim_start_matches("0x"))
        .context("signature is not valid hex")?;
    let (builder, config) = scheme.resolve()?;
    let sig = SignatureVerifier::check_format(&bytes)?;
    let trusted = config.as_ref().map(|c| c.trusted_signer).unwrap_or(Address::ZERO);
    let recovered = SignatureVerifier::new(trusted, builder).recover(&claimant, amount, &sig)?;

    let mut out = format!("signer: {}", to_checksum(&recovered));
    if config.is_some() {
        out.push_str(&format!("\ntrusted: {}", recovered == trusted));
    }
    Ok(out)
}

pub fn check_config(path: &Path, engine: Option<Address>) -> anyhow::Result<String> {
    let config = load_config(path)?;
    let mut out = format!(
        "trusted_signer: {}\ntoken:          {}\nmax_supply:     {}\nmax_per_claim:  {}\nscheme:         {}",
        to_checksum(&config.trusted_signer),
        to_checksum(&config.token),
        config.max_supply,
        config.max_per_claim,
        config.scheme.kind(),
    );
    if let SchemeConfig::TypedData {
        name,
        version,
        chain_id,
    } = &config.scheme
    {
        out.push_str(&format!(
            "\ndomain:         {name} v{version} on {chain_id}"
        ));
        if let Some(engine) = engine {
            let separator = config.scheme.digest_builder(engine).domain_separator();
            if let Some(separator) = separator {
                out.push_str(&format!("\nseparator:      0x{}", hex::encode(separator)));
            }
        }
    }
    Ok(out)
}
