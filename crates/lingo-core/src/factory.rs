use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use lingo_config::{Config, ConfigPatch};
use lingo_phonetic::PhoneticService;
use lingo_providers::{GeminiTranslator, GoogleTranslator, MyMemoryTranslator, OpenAiTranslator};
use lingo_translator::{HttpProxy, ProxyFetch, ServiceId, Translator};

/// Long-lived collaborators handed to every adapter
#[derive(Clone)]
pub struct Collaborators {
    pub client: reqwest::Client,
    pub phonetics: Arc<PhoneticService>,
    pub proxy: Arc<dyn ProxyFetch>,
}

type Constructor = fn(&Config, &Collaborators) -> Arc<dyn Translator>;

fn google(config: &Config, deps: &Collaborators) -> Arc<dyn Translator> {
    Arc::new(GoogleTranslator::new(
        deps.client.clone(),
        config.network.google_url.clone(),
        deps.phonetics.clone(),
    ))
}

fn gemini(config: &Config, deps: &Collaborators) -> Arc<dyn Translator> {
    Arc::new(GeminiTranslator::new(
        deps.client.clone(),
        config.translator.gemini_api_key.clone(),
        config.network.gemini_url.clone(),
        deps.phonetics.clone(),
    ))
}

fn openai(config: &Config, deps: &Collaborators) -> Arc<dyn Translator> {
    Arc::new(OpenAiTranslator::new(
        deps.proxy.clone(),
        config.translator.openai_api_key.clone(),
        config.translator.openai_proxy_url.clone(),
        config.translator.openai_model.clone(),
        deps.phonetics.clone(),
    ))
}

fn mymemory(config: &Config, deps: &Collaborators) -> Arc<dyn Translator> {
    Arc::new(MyMemoryTranslator::new(
        deps.client.clone(),
        config.network.mymemory_url.clone(),
        deps.phonetics.clone(),
    ))
}

/// Creates adapters on demand and memoizes one instance per provider.
///
/// Any configuration change drops every cached instance, so the next lookup
/// builds adapters from the new settings.
pub struct TranslationFactory {
    registry: HashMap<ServiceId, Constructor>,
    config: RwLock<Config>,
    deps: RwLock<Collaborators>,
    cache: Mutex<HashMap<ServiceId, Arc<dyn Translator>>>,
}

impl TranslationFactory {
    /// Factory sharing `client` between adapters. Timeouts are whatever the
    /// caller configured on the client.
    pub fn new(config: Config, client: reqwest::Client) -> Self {
        let proxy: Arc<dyn ProxyFetch> = Arc::new(HttpProxy::new(client.clone()));
        Self::with_proxy(config, client, proxy)
    }

    /// Factory whose OpenAI-compatible adapter sends through `proxy`
    pub fn with_proxy(config: Config, client: reqwest::Client, proxy: Arc<dyn ProxyFetch>) -> Self {
        let phonetics = Arc::new(PhoneticService::new(
            client.clone(),
            config.network.dictionary_url.clone(),
        ));

        let mut registry: HashMap<ServiceId, Constructor> = HashMap::new();
        registry.insert(ServiceId::Google, google);
        registry.insert(ServiceId::Gemini, gemini);
        registry.insert(ServiceId::OpenAi, openai);
        registry.insert(ServiceId::MyMemory, mymemory);

        Self {
            registry,
            config: RwLock::new(config),
            deps: RwLock::new(Collaborators {
                client,
                phonetics,
                proxy,
            }),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Adapter for `service_id`. Unknown ids resolve to the default provider.
    pub fn get_translator(&self, service_id: &str) -> Arc<dyn Translator> {
        let id = ServiceId::from_id(service_id).unwrap_or_else(|| {
            tracing::warn!("Unknown service: {service_id}, falling back to {}", ServiceId::DEFAULT);
            ServiceId::DEFAULT
        });

        let mut cache = self.lock_cache();
        if let Some(translator) = cache.get(&id) {
            return translator.clone();
        }

        let translator = match self.registry.get(&id) {
            Some(construct) => {
                let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
                let deps = self.deps.read().unwrap_or_else(PoisonError::into_inner);
                construct(&config, &deps)
            }
            None => {
                drop(cache);
                tracing::warn!("No constructor registered for {id}");
                return self.get_translator(ServiceId::DEFAULT.as_str());
            }
        };

        tracing::debug!("Created translator for {id}");
        cache.insert(id, translator.clone());
        translator
    }

    /// Merge `patch` into the stored configuration and drop cached adapters
    pub fn update_config(&self, patch: ConfigPatch) {
        {
            let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
            let old_dictionary = config.network.dictionary_url.clone();
            config.apply(patch);

            if config.network.dictionary_url != old_dictionary {
                let mut deps = self.deps.write().unwrap_or_else(PoisonError::into_inner);
                deps.phonetics = Arc::new(PhoneticService::new(
                    deps.client.clone(),
                    config.network.dictionary_url.clone(),
                ));
            }
        }

        self.invalidate();
    }

    /// Drop every cached adapter instance
    pub fn invalidate(&self) {
        let mut cache = self.lock_cache();
        tracing::debug!("Dropping {} cached translators", cache.len());
        cache.clear();
    }

    pub fn config(&self) -> Config {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn cached_count(&self) -> usize {
        self.lock_cache().len()
    }

    pub fn phonetics(&self) -> Arc<PhoneticService> {
        self.deps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .phonetics
            .clone()
    }

    fn lock_cache(&self) -> MutexGuard<'_, HashMap<ServiceId, Arc<dyn Translator>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use lingo_config::network::NetworkConfig;

    use super::*;

    fn factory() -> TranslationFactory {
        let config = Config {
            network: NetworkConfig::with_base_url("http://127.0.0.1:9"),
            ..Config::default()
        };
        TranslationFactory::new(config, reqwest::Client::new())
    }

    #[test]
    fn test_same_instance_until_config_changes() {
        let factory = factory();
        let first = factory.get_translator("google");
        let second = factory.get_translator("google");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(factory.cached_count(), 1);

        factory.update_config(ConfigPatch {
            target_lang: Some("ja".into()),
            ..Default::default()
        });
        assert_eq!(factory.cached_count(), 0);

        let third = factory.get_translator("google");
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(factory.config().translator.target_lang, "ja");
    }

    #[test]
    fn test_unknown_service_resolves_to_google() {
        let factory = factory();
        let translator = factory.get_translator("babelfish");
        assert_eq!(translator.service_id(), ServiceId::Google);
        assert!(Arc::ptr_eq(&translator, &factory.get_translator("google")));
    }

    #[test]
    fn test_every_registered_service() {
        let factory = factory();
        for id in ServiceId::ALL {
            assert_eq!(factory.get_translator(id.as_str()).service_id(), id);
        }
        assert_eq!(factory.cached_count(), ServiceId::ALL.len());
    }

    #[test]
    fn test_empty_patch_still_invalidates() {
        let factory = factory();
        let first = factory.get_translator("google");
        factory.get_translator("mymemory");

        factory.update_config(ConfigPatch::default());
        assert_eq!(factory.cached_count(), 0);

        let second = factory.get_translator("google");
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_dictionary_change_rebuilds_phonetics() {
        let factory = factory();
        let before = factory.phonetics();
        factory.update_config(ConfigPatch {
            dictionary_url: Some("http://127.0.0.1:9/other".into()),
            ..Default::default()
        });
        assert!(!Arc::ptr_eq(&before, &factory.phonetics()));
    }
}
