//! The storefront controller.

use std::sync::Arc;

use super::inquiry::OrderInquiry;
use super::state::{StorefrontAction, StorefrontState};
use crate::catalog::{Catalog, Product};
use crate::config::{OrderConfig, StorefrontConfig};
use crate::error::{LuminaError, Result};
use crate::linking::{Segment, segment};
use crate::recommend::Recommender;
use crate::session::{ConversationSession, PromptBuilder, TextGenerator};
use crate::wishlist::{KeyValueStore, WishlistManager};

/// Owns the catalog, the UI state, and the services acting on them.
///
/// The wishlist is hydrated once on construction and re-persisted after
/// every action that changes it.
pub struct Storefront {
    catalog: Arc<Catalog>,
    brand_name: String,
    state: StorefrontState,
    wishlist_manager: WishlistManager,
    recommender: Recommender,
    conversation: Arc<ConversationSession>,
    order: OrderConfig,
}

impl Storefront {
    pub fn new(
        catalog: Arc<Catalog>,
        brand_name: impl Into<String>,
        wishlist_manager: WishlistManager,
        recommender: Recommender,
        conversation: Arc<ConversationSession>,
    ) -> Self {
        let wishlist = wishlist_manager.load();
        tracing::info!("Storefront ready with {} wishlisted items", wishlist.len());

        Self {
            catalog,
            brand_name: brand_name.into(),
            state: StorefrontState::with_wishlist(wishlist),
            wishlist_manager,
            recommender,
            conversation,
            order: OrderConfig::default(),
        }
    }

    /// Replaces the order hand-off settings.
    pub fn with_order_config(mut self, order: OrderConfig) -> Self {
        self.order = order;
        self
    }

    /// Wires a storefront from configuration and the two external ports.
    pub fn from_config(
        config: &StorefrontConfig,
        catalog: Arc<Catalog>,
        store: Arc<dyn KeyValueStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let wishlist_manager = WishlistManager::with_key(store, config.storage_key.clone());
        let recommender = Recommender::new(config.recommendation.admission_policy());
        let prompt = PromptBuilder::new(config.brand_name.clone(), config.assistant.max_sentences);
        let conversation = Arc::new(ConversationSession::new(
            catalog.clone(),
            generator,
            prompt,
            config.assistant.pinned_model().unwrap_or_default(),
        ));

        Self::new(
            catalog,
            config.brand_name.clone(),
            wishlist_manager,
            recommender,
            conversation,
        )
        .with_order_config(config.order.clone())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &StorefrontState {
        &self.state
    }

    pub fn brand_name(&self) -> &str {
        &self.brand_name
    }

    /// WhatsApp number, form link and greeting used for orders.
    pub fn order_config(&self) -> &OrderConfig {
        &self.order
    }

    /// Applies an action. Returns true if the state changed.
    pub fn dispatch(&mut self, action: StorefrontAction) -> bool {
        let next = self.state.reduce(&action, &self.catalog);
        if next == self.state {
            return false;
        }

        if next.wishlist != self.state.wishlist {
            if let Err(e) = self.wishlist_manager.save(&next.wishlist) {
                tracing::warn!("Failed to persist wishlist: {}", e);
            }
        }

        self.state = next;
        true
    }

    /// "View product" hook for product cards and linked mentions.
    pub fn on_view_product(&mut self, product_id: &str) -> bool {
        self.dispatch(StorefrontAction::ViewProduct(product_id.to_string()))
    }

    /// Wishlist heart hook.
    pub fn on_toggle_wishlist(&mut self, product_id: &str) -> bool {
        self.dispatch(StorefrontAction::ToggleWishlist(product_id.to_string()))
    }

    pub fn is_wishlisted(&self, product_id: &str) -> bool {
        self.state.wishlist.contains(product_id)
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.state
            .selected_product
            .as_deref()
            .and_then(|id| self.catalog.get(id))
    }

    /// The shop grid under the current filters.
    pub fn filtered_products(&self) -> Vec<&Product> {
        self.catalog.filter(&self.state.filters)
    }

    pub fn wishlisted_products(&self) -> Vec<&Product> {
        self.state.wishlist.resolve(&self.catalog)
    }

    pub fn new_arrivals(&self) -> &[Product] {
        self.catalog.new_arrivals()
    }

    /// Cross-sell products for the open product view.
    pub fn recommendations(&self) -> Vec<&Product> {
        match self.selected_product() {
            Some(product) => self.recommender.recommend(&self.catalog, product),
            None => Vec::new(),
        }
    }

    /// Order inquiry for the open product view.
    pub fn order_inquiry(&self, size: Option<&str>, color: Option<&str>) -> Result<OrderInquiry> {
        let product = self
            .selected_product()
            .ok_or_else(|| LuminaError::not_found("selected product", "none"))?;
        OrderInquiry::for_product(&self.order.greeting_name, product, size, color)
    }

    /// Splits text into plain and product-reference segments.
    pub fn segment(&self, text: &str) -> Vec<Segment> {
        segment(text, &self.catalog)
    }

    pub fn conversation(&self) -> Arc<ConversationSession> {
        self.conversation.clone()
    }

    /// The latest assistant turn, segmented.
    pub async fn segment_last_reply(&self) -> Option<Vec<Segment>> {
        let reply = self.conversation.last_reply().await?;
        Some(self.segment(&reply.content))
    }

    /// Sends a message to the stylist with the current wishlist as context
    /// and returns the reply, segmented for rendering.
    pub async fn send_message(&self, text: &str) -> Result<Vec<Segment>> {
        let wishlist = self.state.wishlist.clone();
        let reply = self.conversation.send(text, &wishlist).await?;
        Ok(self.segment(&reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::GenerationRequest;
    use crate::storefront::Page;
    use crate::wishlist::WISHLIST_STORAGE_KEY;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        entries: Mutex<HashMap<String, String>>,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    struct EchoFavorites;

    #[async_trait]
    impl TextGenerator for EchoFavorites {
        async fn generate(&self, request: GenerationRequest) -> Result<String> {
            if request.system_instruction.contains("Ethereal Lace Bralette Set.") {
                Ok("Since you liked the Ethereal Lace Bralette Set, try the Satin Muse Slip Gown.".to_string())
            } else {
                Ok("Start with the Urban Oversized Blazer.".to_string())
            }
        }
    }

    fn storefront(store: Arc<MemoryStore>) -> Storefront {
        Storefront::from_config(
            &StorefrontConfig::default(),
            Arc::new(Catalog::builtin()),
            store,
            Arc::new(EchoFavorites),
        )
    }

    #[test]
    fn test_toggle_persists_and_rehydrates() {
        let store = Arc::new(MemoryStore::default());
        let mut first = storefront(store.clone());
        assert!(first.wishlisted_products().is_empty());

        assert!(first.on_toggle_wishlist("5"));
        assert_eq!(
            store.get(WISHLIST_STORAGE_KEY).unwrap().as_deref(),
            Some(r#"["5"]"#)
        );

        let second = storefront(store);
        assert!(second.is_wishlisted("5"));
        let names: Vec<_> = second
            .wishlisted_products()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ethereal Lace Bralette Set"]);
    }

    #[test]
    fn test_view_missing_product_changes_nothing() {
        let mut storefront = storefront(Arc::new(MemoryStore::default()));
        assert!(!storefront.on_view_product("missing"));
        assert!(storefront.selected_product().is_none());
        assert!(storefront.recommendations().is_empty());
    }

    #[test]
    fn test_selected_product_drives_recommendations_and_inquiry() {
        let mut storefront = storefront(Arc::new(MemoryStore::default()));
        assert!(storefront.on_view_product("8"));

        let recs: Vec<_> = storefront
            .recommendations()
            .iter()
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(recs, vec!["7", "1", "2"]);

        let inquiry = storefront.order_inquiry(Some("L"), Some("cobalt")).unwrap();
        assert!(inquiry.message().contains("Product: Active Tech Bodysuit"));
        assert!(inquiry.message().starts_with("Hi Lumina Style!"));
    }

    #[test]
    fn test_order_settings_come_from_config() {
        let mut config = StorefrontConfig::default();
        config.order.greeting_name = "ACME".to_string();
        config.order.whatsapp_number = "+49 151 2345".to_string();
        let mut storefront = Storefront::from_config(
            &config,
            Arc::new(Catalog::builtin()),
            Arc::new(MemoryStore::default()),
            Arc::new(EchoFavorites),
        );
        assert!(storefront.order_inquiry(None, None).is_err());

        storefront.on_view_product("3");
        let inquiry = storefront.order_inquiry(None, None).unwrap();
        assert!(inquiry.message().starts_with("Hi ACME!"));

        let url = inquiry
            .whatsapp_url(&storefront.order_config().whatsapp_number)
            .unwrap();
        assert!(url.as_str().starts_with("https://wa.me/491512345?text=Hi+ACME%21"));
        assert_eq!(storefront.order_config().form_url, config.order.form_url);
    }

    #[test]
    fn test_filtered_products_follow_filter_actions() {
        let mut storefront = storefront(Arc::new(MemoryStore::default()));
        storefront.dispatch(StorefrontAction::Navigate(Page::Shop));
        storefront.dispatch(StorefrontAction::ToggleColor("Dusty Rose".to_string()));
        let ids: Vec<_> = storefront
            .filtered_products()
            .iter()
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(ids, vec!["3", "5"]);
        assert_eq!(storefront.state().page, Page::Shop);
    }

    #[test]
    fn test_unchanged_dispatch_does_not_write() {
        let store = Arc::new(MemoryStore::default());
        let mut storefront = storefront(store.clone());
        assert!(!storefront.dispatch(StorefrontAction::CloseProduct));
        assert!(store.get(WISHLIST_STORAGE_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_send_message_uses_wishlist_and_links_reply() {
        let mut storefront = storefront(Arc::new(MemoryStore::default()));
        storefront.on_toggle_wishlist("5");

        let segments = storefront.send_message("Any ideas?").await.unwrap();
        let linked: Vec<_> = segments.iter().filter_map(Segment::product_id).collect();
        assert_eq!(linked, vec!["5", "6"]);
        assert_eq!(storefront.segment_last_reply().await.unwrap(), segments);

        // A linked mention opens the product by id
        assert!(storefront.on_view_product(linked[1]));
        assert_eq!(storefront.selected_product().unwrap().name, "Satin Muse Slip Gown");
    }
}
