//! Structured workflow menus sent by the peer.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use super::{HandlerContext, RecordHandler, fallback_message};
use crate::overlay::domain::OverlayBundle;
use crate::timeline::domain::{
    ExchangeRecord, HandlerType, MenuPayload, MessageBody, NormalizedMessage, RecordId,
};
use crate::timeline::ports::Translator;
use crate::timeline::services::{MenuActionOutcome, MenuActionService, UserAlert};

const HANDLER_TYPE: &str = "action_menu";
const LABEL_KEY: &str = "Chat.ActionMenu";

/// Number of parsed menus kept before the oldest is evicted.
pub const MENU_MEMO_CAPACITY: usize = 128;

/// Recently parsed menus, oldest first.
#[derive(Debug, Default)]
struct MenuMemo {
    menus: HashMap<RecordId, Arc<MenuPayload>>,
    order: VecDeque<RecordId>,
}

impl MenuMemo {
    fn get(&self, record_id: &RecordId) -> Option<Arc<MenuPayload>> {
        self.menus.get(record_id).cloned()
    }

    fn insert(&mut self, record_id: RecordId, menu: Arc<MenuPayload>) {
        while self.order.len() >= MENU_MEMO_CAPACITY {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.menus.remove(&oldest);
        }
        self.order.push_back(record_id.clone());
        self.menus.insert(record_id, menu);
    }

    fn remove(&mut self, record_id: &RecordId) {
        if self.menus.remove(record_id).is_some() {
            self.order.retain(|id| id != record_id);
        }
    }
}

/// Accepts basic messages whose body is a menu payload.
///
/// Parsed menus are memoized by record identifier, so classification and
/// projection of the same record decode the body once. Records that are not
/// menus are not remembered, and at most [`MENU_MEMO_CAPACITY`] menus are
/// kept.
#[derive(Debug)]
pub struct ActionMenuHandler {
    handler_type: HandlerType,
    parsed: Mutex<MenuMemo>,
}

impl Default for ActionMenuHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionMenuHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handler_type: HandlerType::builtin(HANDLER_TYPE),
            parsed: Mutex::new(MenuMemo::default()),
        }
    }

    /// Returns the menu carried by `record`, if any.
    #[must_use]
    pub fn menu(&self, record: &ExchangeRecord) -> Option<Arc<MenuPayload>> {
        let content = record.message_content()?;
        if let Some(menu) = self.lock_memo().get(record.id()) {
            return Some(menu);
        }
        let menu = Arc::new(MenuPayload::parse(content)?);
        self.lock_memo().insert(record.id().clone(), Arc::clone(&menu));
        Some(menu)
    }

    /// Drops the memoized parse for `record_id`.
    pub fn forget(&self, record_id: &RecordId) {
        self.lock_memo().remove(record_id);
    }

    /// Number of menus currently memoized.
    #[must_use]
    pub fn memoized(&self) -> usize {
        self.lock_memo().menus.len()
    }

    fn lock_memo(&self) -> MutexGuard<'_, MenuMemo> {
        self.parsed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Presses the button at `index` of the menu carried by `record`.
    ///
    /// # Errors
    ///
    /// Returns a [`UserAlert`] when the record carries no menu, the item is
    /// not a button, or the resulting workflow action fails.
    pub async fn press_button(
        &self,
        record: &ExchangeRecord,
        index: usize,
        context: &HandlerContext,
    ) -> Result<MenuActionOutcome, UserAlert> {
        let service = MenuActionService::new(context.clone());
        let Some(menu) = self.menu(record) else {
            warn!(record_id = %record.id(), "button pressed on a record without a menu");
            return Err(service.missing_button_alert());
        };
        service.press_button(&menu, index).await
    }
}

impl RecordHandler for ActionMenuHandler {
    fn handler_type(&self) -> &HandlerType {
        &self.handler_type
    }

    fn display_name(&self) -> &str {
        "Action menu"
    }

    fn can_handle(&self, record: &ExchangeRecord) -> bool {
        self.menu(record).is_some()
    }

    fn display_label(&self, _record: &ExchangeRecord, translator: &dyn Translator) -> String {
        translator.translate(LABEL_KEY)
    }

    fn project(
        &self,
        record: &ExchangeRecord,
        _subject: Option<&OverlayBundle>,
        context: &HandlerContext,
    ) -> NormalizedMessage {
        let Some(menu) = self.menu(record) else {
            warn!(record_id = %record.id(), "menu handler asked to project a non-menu record");
            return fallback_message(self, record, context);
        };
        NormalizedMessage::for_record(
            record,
            self.handler_type.clone(),
            menu.summary(),
            MessageBody::Menu(MenuPayload::clone(&menu)),
        )
        .with_label(self.display_label(record, context.translator()))
        .with_role(self.role(record))
    }
}
