pub mod constants;
pub mod params;

use std::ops::Deref;

use params::Params;

/// Protocol configuration bundled up under a single struct. Use `Config::new` for directly building from
/// a `Params` instance, or `ConfigBuilder` for anything more involved. NOTE: this struct can be
/// implicitly de-refed into `Params`
#[derive(Clone, Debug)]
pub struct Config {
    /// Protocol params
    pub params: Params,

    //
    // Additional configuration arguments which are not protocol sensitive
    //
    /// Enable sanity checks which re-verify invariants of already validated data
    pub enable_sanity_checks: bool,
}

impl Config {
    pub fn new(params: Params) -> Self {
        Self { params, enable_sanity_checks: false }
    }

    pub fn to_builder(&self) -> ConfigBuilder {
        ConfigBuilder { config: self.clone() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(params::MAINNET_PARAMS)
    }
}

impl AsRef<Params> for Config {
    fn as_ref(&self) -> &Params {
        &self.params
    }
}

impl Deref for Config {
    type Target = Params;

    fn deref(&self) -> &Self::Target {
        &self.params
    }
}

pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new(params: Params) -> Self {
        Self { config: Config::new(params) }
    }

    pub fn edit_protocol_params<F>(mut self, edit_func: F) -> Self
    where
        F: Fn(&mut Params),
    {
        edit_func(&mut self.config.params);
        self
    }

    pub fn apply_args<F>(mut self, edit_func: F) -> Self
    where
        F: Fn(&mut Config),
    {
        edit_func(&mut self.config);
        self
    }

    pub fn enable_sanity_checks(mut self) -> Self {
        self.config.enable_sanity_checks = true;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new(params::MAINNET_PARAMS)
            .edit_protocol_params(|p| p.subrealm_payment_delay_blocks = 30)
            .enable_sanity_checks()
            .build();
        assert_eq!(config.subrealm_payment_delay_blocks, 30);
        assert_eq!(config.name_commit_reveal_delay_blocks, constants::protocol::MINT_NAME_COMMIT_REVEAL_DELAY_BLOCKS);
        assert!(config.enable_sanity_checks);

        let rebuilt = config.to_builder().apply_args(|c| c.enable_sanity_checks = false).build();
        assert!(!rebuilt.enable_sanity_checks);
        assert_eq!(rebuilt.params, config.params);
    }
}
