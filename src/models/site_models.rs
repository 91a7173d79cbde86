use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// Persisted key names. These match the historical browser-storage layout so
// exported data from the old site keeps working.
pub const KEY_CHATBOT_PROMPT: &str = "fareapp_chatbot_prompt";
pub const KEY_MOCKUPS: &str = "fareapp_templates";
pub const KEY_SITE_LOGO: &str = "fareapp_site_logo";
pub const KEY_PLAY_STORE_URL: &str = "fareapp_play_store_url";
pub const KEY_APP_STORE_URL: &str = "fareapp_app_store_url";

pub const ALL_KEYS: [&str; 5] = [
    KEY_CHATBOT_PROMPT,
    KEY_MOCKUPS,
    KEY_SITE_LOGO,
    KEY_PLAY_STORE_URL,
    KEY_APP_STORE_URL,
];

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = r#"
Sei "Alex", il Senior App Consultant di "Fare App", l'agenzia web d'élite specializzata nello sviluppo di applicazioni mobili Native per iOS e Android.

IL TUO OBIETTIVO:
Guidare l'utente verso la richiesta di un preventivo o contatto, spiegando il valore aggiunto di avere un'App proprietaria.

TONO DI VOCE:
Professionale, tecnologico, sicuro di sé, ma empatico e chiaro. Non usare tecnicismi inutili, parla di vantaggi per il business.

PUNTI DI FORZA DA EVIDENZIARE (Usa questi argomenti):
1. **Sviluppo Nativo**: Non facciamo semplici "siti web in un'app". Usiamo tecnologie native per prestazioni massime e fluidità assoluta.
2. **Fidelizzazione**: Spiega come le Notifiche Push e le Fidelity Card digitali aumentano il ritorno dei clienti (Retention).
3. **M-Commerce**: Vendere direttamente dallo smartphone è il futuro.
4. **Chiavi in mano**: Ci occupiamo di tutto noi: Design UX/UI, Sviluppo, Test e Pubblicazione su Apple Store e Google Play.

GESTIONE PREZZI:
Non fornire mai prezzi fissi o stime numeriche specifiche in chat.
Rispondi così: "Ogni progetto è unico come la tua azienda. Per darti una stima precisa e senza impegno, ti invito a cliccare sul tasto 'Preventivo Gratuito' o a contattarci direttamente."

CHIUSURA:
Cerca sempre di chiudere la risposta con una domanda aperta per stimolare la conversazione (es. "Qual è il settore della tua attività?", "Hai già un'idea di come vorresti la tua app?").

Rispondi sempre in Italiano perfetto.
"#;

/// One app-portfolio entry shown in the public mockup gallery.
///
/// Serde names match the JSON stored under `fareapp_templates` by every
/// earlier revision of the admin panel (`image`, `playStoreUrl`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockupRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "image")]
    pub image_url: String,
    #[serde(rename = "playStoreUrl", default)]
    pub play_store_url: String,
    #[serde(rename = "appStoreUrl", default)]
    pub app_store_url: String,
}

impl MockupRecord {
    pub fn placeholder(id: String) -> Self {
        Self {
            id,
            name: "Nuova App".to_string(),
            category: "Generale".to_string(),
            description: String::new(),
            image_url: String::new(),
            play_store_url: String::new(),
            app_store_url: String::new(),
        }
    }
}

/// The full operator-editable site configuration. Always structurally
/// complete: absent persisted fields are filled with these defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub chatbot_prompt: String,
    pub site_logo_url: String,
    pub global_play_store_url: String,
    pub global_app_store_url: String,
    pub mockups: Vec<MockupRecord>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            chatbot_prompt: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            site_logo_url: String::new(),
            global_play_store_url: String::new(),
            global_app_store_url: String::new(),
            // The stock gallery is a display-time fallback, not persisted
            // state, so the stored default stays empty.
            mockups: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Static entry of the feature-module catalog ("Moduli Professionali").
/// Not operator-editable, so it lives here rather than in the store.
#[derive(Debug, Clone, Serialize)]
pub struct SiteModule {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const MODULES: [SiteModule; 8] = [
    SiteModule {
        id: "push",
        title: "Notifiche Push",
        description: "Invia messaggi illimitati direttamente sugli smartphone dei tuoi clienti per promozioni e avvisi.",
        icon: "bell",
    },
    SiteModule {
        id: "mcommerce",
        title: "M-Commerce",
        description: "Un vero negozio online nel palmo della mano. Gestisci ordini, prodotti e pagamenti sicuri.",
        icon: "shopping-cart",
    },
    SiteModule {
        id: "loyalty",
        title: "Fidelity Card",
        description: "Digitalizza la raccolta punti. Fidelizza i tuoi clienti con premi e sconti esclusivi.",
        icon: "credit-card",
    },
    SiteModule {
        id: "forms",
        title: "Moduli Personalizzati",
        description: "Crea form di contatto, prenotazione o sondaggi su misura per le tue esigenze aziendali.",
        icon: "form-input",
    },
    SiteModule {
        id: "radio",
        title: "Audio & Radio",
        description: "Integra streaming audio live, podcast o playlist per intrattenere la tua community.",
        icon: "radio",
    },
    SiteModule {
        id: "social",
        title: "Integrazione Social",
        description: "Collega i tuoi profili Facebook, Instagram e YouTube per una presenza cross-canale.",
        icon: "share2",
    },
    SiteModule {
        id: "booking",
        title: "Prenotazioni",
        description: "Permetti ai clienti di prenotare appuntamenti, tavoli o servizi direttamente dall'app.",
        icon: "layout",
    },
    SiteModule {
        id: "directory",
        title: "Directory & Mappe",
        description: "Mostra i tuoi punti vendita o partner su una mappa interattiva con indicazioni stradali.",
        icon: "map-pin",
    },
];

fn stock(id: &str, name: &str, category: &str, image: &str, description: &str) -> MockupRecord {
    MockupRecord {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        image_url: image.to_string(),
        play_store_url: String::new(),
        app_store_url: String::new(),
    }
}

/// The stock gallery shown before the operator has ever saved anything.
pub static DEFAULT_MOCKUPS: Lazy<Vec<MockupRecord>> = Lazy::new(|| {
    vec![
        stock(
            "1",
            "Ristorante Elite",
            "Food & Drink",
            "https://images.unsplash.com/photo-1543589077-47d81606c1ad?auto=format&fit=crop&q=80&w=800",
            "Gestione tavoli, menu digitale e prenotazioni veloci.",
        ),
        stock(
            "2",
            "Gourmet Light",
            "Food & Drink",
            "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?auto=format&fit=crop&q=80&w=800",
            "Esperienza utente raffinata per alta cucina.",
        ),
        stock(
            "3",
            "Cafè Moderno",
            "Food & Drink",
            "https://images.unsplash.com/photo-1501339817302-ee4fba293ee8?auto=format&fit=crop&q=80&w=800",
            "Ordini rapidi al bancone e programmi fedeltà.",
        ),
        stock(
            "4",
            "Bistrot Dark",
            "Food & Drink",
            "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?auto=format&fit=crop&q=80&w=800",
            "Interfaccia elegante con tema scuro.",
        ),
        stock(
            "5",
            "Auto Service Plus",
            "Servizi Auto",
            "https://images.unsplash.com/photo-1487754164315-0aa93959da3b?auto=format&fit=crop&q=80&w=800",
            "Prenotazione tagliandi e storico interventi.",
        ),
        stock(
            "6",
            "Sport & Golf Club",
            "Sport & Leisure",
            "https://images.unsplash.com/photo-1535131749006-b7f58c99034b?auto=format&fit=crop&q=80&w=800",
            "Prenotazione campi e gestione soci.",
        ),
        stock(
            "7",
            "Classic Coffee",
            "Food & Drink",
            "https://images.unsplash.com/photo-1559925393-8be0ec41b50b?auto=format&fit=crop&q=80&w=800",
            "Lo shop dei tuoi prodotti in un palmo.",
        ),
        stock(
            "8",
            "Servizi Casa Pro",
            "Servizi Casa",
            "https://images.unsplash.com/photo-1581578731522-745505146317?auto=format&fit=crop&q=80&w=800",
            "Assistenza rapida per manutenzioni domestiche.",
        ),
        stock(
            "9",
            "Sushi & Fusion",
            "Food & Drink",
            "https://images.unsplash.com/photo-1579871494447-9811cf80d66c?auto=format&fit=crop&q=80&w=800",
            "Take away e delivery ottimizzato.",
        ),
        stock(
            "10",
            "Events & Bar",
            "Eventi",
            "https://images.unsplash.com/photo-1470337458703-46ad1756a187?auto=format&fit=crop&q=80&w=800",
            "Lista eventi e prevendite integrate.",
        ),
        stock(
            "11",
            "E-commerce Shop",
            "Shopping",
            "https://images.unsplash.com/photo-1556742049-13da736c7459?auto=format&fit=crop&q=80&w=800",
            "Navigazione catalogo e checkout sicuro.",
        ),
        stock(
            "12",
            "Medical Bundle Pro",
            "Salute & Medicale",
            "https://images.unsplash.com/photo-1519494026892-80bbd2d6fd0d?auto=format&fit=crop&q=80&w=800",
            "Telemedicina e prenotazione visite.",
        ),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mockup_json_uses_historical_field_names() {
        let record = MockupRecord {
            id: "42".to_string(),
            name: "Test".to_string(),
            category: "Food & Drink".to_string(),
            description: String::new(),
            image_url: "https://example.com/a.png".to_string(),
            play_store_url: "https://play.google.com/x".to_string(),
            app_store_url: String::new(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["image"], "https://example.com/a.png");
        assert_eq!(value["playStoreUrl"], "https://play.google.com/x");
        assert!(value.get("image_url").is_none());
    }

    #[test]
    fn mockup_optional_urls_default_to_empty() {
        let raw = r#"{"id":"1","name":"A","category":"B","image":"img"}"#;
        let record: MockupRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.description, "");
        assert_eq!(record.play_store_url, "");
        assert_eq!(record.app_store_url, "");
    }

    #[test]
    fn default_config_is_structurally_complete() {
        let config = SiteConfig::default();
        assert!(config.chatbot_prompt.contains("Alex"));
        assert!(config.site_logo_url.is_empty());
        assert!(config.mockups.is_empty());
        assert_eq!(DEFAULT_MOCKUPS.len(), 12);
    }

    #[test]
    fn chat_role_wire_names() {
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&ChatRole::Model).unwrap(), "\"model\"");
    }
}
