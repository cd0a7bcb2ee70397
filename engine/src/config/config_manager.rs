use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads, validates and caches a settings value. A missing source yields `TConfig::default()`.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    pub fn get_config(&self) -> Result<TConfig, ConfigError> {
        let mut current = self.config.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config.validate().map_err(ConfigError::Invalid)?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self.config.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineSettings;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryContentProvider {
        content: RefCell<Option<String>>,
    }

    impl ConfigContentProvider for MemoryContentProvider {
        fn get_config_content(&self) -> Result<Option<String>, ConfigError> {
            Ok(self.content.borrow().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), ConfigError> {
            *self.content.borrow_mut() = Some(content.to_string());
            Ok(())
        }
    }

    fn manager_with(content: Option<&str>) -> ConfigManager<MemoryContentProvider, EngineSettings> {
        let provider = MemoryContentProvider {
            content: RefCell::new(content.map(str::to_string)),
        };
        ConfigManager::new(provider, YamlConfigSerializer::new())
    }

    #[test]
    fn test_missing_content_yields_defaults() {
        let manager = manager_with(None);
        assert_eq!(manager.get_config().unwrap(), EngineSettings::default());
    }

    #[test]
    fn test_partial_yaml_fills_remaining_defaults() {
        let manager = manager_with(Some("board_size: 7\nwin_length: 4\n"));
        let settings = manager.get_config().unwrap();

        assert_eq!(settings.board_size, 7);
        assert_eq!(settings.win_length, 4);
        assert_eq!(settings.search_depth, EngineSettings::default().search_depth);
    }

    #[test]
    fn test_invalid_yaml_settings_are_rejected() {
        let manager = manager_with(Some("board_size: 3\nwin_length: 5\n"));
        assert!(matches!(manager.get_config(), Err(ConfigError::Invalid(_))));

        let manager = manager_with(Some("board_size: [not, a, number]\n"));
        assert!(matches!(manager.get_config(), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_set_config_round_trips_through_provider() {
        let manager = manager_with(None);
        let settings = EngineSettings {
            board_size: 10,
            win_length: 5,
            worker_count: Some(3),
            ..EngineSettings::default()
        };

        manager.set_config(&settings).unwrap();
        let stored = manager.config_content_provider.get_config_content().unwrap().unwrap();

        let reloaded = manager_with(Some(&stored));
        assert_eq!(reloaded.get_config().unwrap(), settings);
    }
}
