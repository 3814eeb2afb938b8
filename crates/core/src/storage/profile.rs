use crate::domain::profile::UserProfile;
use crate::storage::ensure_parent_dir;
use anyhow::Context;
use std::path::Path;

/// Reads the saved profile. On first run the default profile is written to `path` and returned.
pub fn load_or_create(path: &Path) -> anyhow::Result<UserProfile> {
    if !path.exists() {
        let profile = UserProfile::default();
        save(path, &profile)?;
        tracing::warn!(path = %path.display(), "no saved profile; wrote defaults");
        return Ok(profile);
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile: {}", path.display()))?;
    let profile: UserProfile = serde_json::from_str(&text)
        .with_context(|| format!("profile is not valid JSON: {}", path.display()))?;
    tracing::info!(
        age = profile.age,
        risk = profile.risk_appetite.as_str(),
        "loaded profile"
    );
    Ok(profile)
}

pub fn save(path: &Path, profile: &UserProfile) -> anyhow::Result<()> {
    ensure_parent_dir(path)?;
    let text = serde_json::to_string_pretty(profile).context("failed to serialize profile")?;
    std::fs::write(path, text)
        .with_context(|| format!("failed to write profile: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::RiskAppetite;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("investor-profile-{}-{name}", std::process::id()))
            .join("user_profile.json")
    }

    #[test]
    fn first_run_writes_the_default_profile() {
        let path = scratch("missing");
        let p = load_or_create(&path).unwrap();
        assert_eq!(p, UserProfile::default());
        assert!(path.exists());
        assert_eq!(load_or_create(&path).unwrap(), UserProfile::default());

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn save_then_load_keeps_the_profile() {
        let path = scratch("saved");
        let profile = UserProfile {
            age: 42,
            monthly_income: 150_000.0,
            monthly_expenses: 60_000.0,
            emergency_fund: 200_000.0,
            risk_appetite: RiskAppetite::High,
            has_term_insurance: true,
            has_health_insurance: false,
        };
        save(&path, &profile).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"current_emergency_fund\""));
        assert_eq!(load_or_create(&path).unwrap(), profile);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
