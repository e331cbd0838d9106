//! Synchronization between the palette, its swatch strip, and the detail editor.
//!
//! [`SyncController`] subscribes to the palette list, the strip, and the
//! editor, and turns events on one side into updates on the others:
//!
//! | Trigger | Reaction |
//! |---|---|
//! | cursor moved | show the new color, highlight it, re-aim the pointer on the next tick |
//! | current index re-selected | toggle the editor (see [`ReselectPolicy`]) |
//! | item replaced | refresh its swatch; show it if it is the current one |
//! | items inserted, removed, or reset | mirror into the strip |
//! | editor edit | replace the current item |
//! | editor remove / duplicate | mutate the list, or show a notice if refused |
//! | swatch tapped | select it |
//! | strip scrolled | re-aim the pointer now |
//!
//! Every subscription captures only a `Weak` reference to the controller, so
//! dropping (or [`dispose`](SyncController::dispose)-ing) the controller
//! detaches it cleanly, and a pointer tick still sitting in the task queue
//! does nothing.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use swatchbook_color::Color;
use swatchbook_core::logging::targets;
use swatchbook_core::{ConnectionGuard, Property, SharedTaskQueue};

use crate::editor::DetailEditor;
use crate::error::CapacityError;
use crate::notice::NoticePresenter;
use crate::selection_list::{ContentChange, SelectionChange, SelectionList};
use crate::strip::SwatchStripView;

/// What happens when the user taps the swatch that is already selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReselectPolicy {
    /// Show the editor if hidden, hide it if shown.
    #[default]
    ToggleEditor,
    /// Do nothing.
    Ignore,
}

struct ControllerInner {
    list: Arc<SelectionList<Color>>,
    editor: Arc<dyn DetailEditor>,
    strip: Arc<dyn SwatchStripView<Color>>,
    notices: Arc<dyn NoticePresenter>,
    tasks: Arc<SharedTaskQueue>,
    policy: Property<ReselectPolicy>,
    alive: AtomicBool,
    subscriptions: Mutex<Vec<ConnectionGuard>>,
}

impl ControllerInner {
    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    fn on_selection_changed(self: &Arc<Self>, change: &SelectionChange) {
        if change.is_reselect() {
            match self.policy.get() {
                ReselectPolicy::ToggleEditor => {
                    let visible = !self.editor.is_visible();
                    tracing::debug!(
                        target: targets::CONTROLLER,
                        visible,
                        "reselect toggles editor"
                    );
                    self.editor.set_visible(visible);
                }
                ReselectPolicy::Ignore => {}
            }
            return;
        }

        tracing::debug!(
            target: targets::CONTROLLER,
            old = ?change.old,
            new = change.new,
            cause = ?change.cause,
            "selection moved"
        );
        if let Some(color) = self.list.get(change.new) {
            self.editor.set_displayed_color(color);
        }
        self.strip.set_highlighted_index(Some(change.new));
        self.schedule_pointer_update();
    }

    fn on_content_changed(&self, change: &ContentChange<Color>) {
        match change {
            ContentChange::Replaced { index, new, .. } => {
                self.strip.refresh_swatch(*index, new);
                if self.list.current_index() == Some(*index) {
                    self.editor.set_displayed_color(*new);
                }
            }
            ContentChange::Inserted { index, value } => {
                self.strip.insert_swatch(*index, value);
                self.strip.set_highlighted_index(self.list.current_index());
            }
            ContentChange::Removed { index, .. } => {
                self.strip.remove_swatch(*index);
                self.strip.set_highlighted_index(self.list.current_index());
            }
            ContentChange::Reset { items } => {
                self.strip.reset_swatches(items);
                self.strip.set_highlighted_index(self.list.current_index());
            }
        }
    }

    fn on_color_edited(&self, color: Color) {
        if let Some(index) = self.list.current_index() {
            self.list.replace(index, color);
        }
    }

    fn on_remove_requested(&self) {
        let Some(index) = self.list.current_index() else {
            return;
        };
        match self.list.remove(index) {
            Ok(_) => {
                if let Some(color) = self.list.current_value() {
                    self.editor.set_displayed_color(color);
                }
                self.update_pointer();
            }
            Err(err) => self.refuse(err),
        }
    }

    fn on_duplicate_requested(&self) {
        let Some(color) = self.list.current_value() else {
            return;
        };
        if let Err(err) = self.list.duplicate(color) {
            self.refuse(err);
        }
    }

    fn refuse(&self, err: CapacityError) {
        tracing::debug!(target: targets::CONTROLLER, error = %err, "palette edit refused");
        if self.notices.is_active() {
            return;
        }
        self.notices.show(&err.to_string());
    }

    /// Re-aim the editor's pointer at the current swatch.
    fn update_pointer(&self) {
        let Some(index) = self.list.current_index() else {
            return;
        };
        if let Some(target) = self.strip.pointer_target(index) {
            self.editor.set_pointer_target(target);
        }
    }

    /// Re-aim the pointer once the host has laid out the strip.
    fn schedule_pointer_update(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        self.tasks.post(move || {
            if let Some(inner) = weak.upgrade()
                && inner.is_alive()
            {
                inner.update_pointer();
            }
        });
    }
}

/// Keeps a palette list, a swatch strip, and a detail editor in step.
///
/// The controller owns shared handles to its collaborators but none of them
/// hold a strong reference back, so there are no reference cycles.
pub struct SyncController {
    inner: Arc<ControllerInner>,
}

impl SyncController {
    /// Wire up the collaborators.
    ///
    /// The strip is rebuilt from the list, the current color is pushed into
    /// the editor, and a pointer update is posted to `tasks`.
    pub fn new(
        list: Arc<SelectionList<Color>>,
        editor: Arc<dyn DetailEditor>,
        strip: Arc<dyn SwatchStripView<Color>>,
        notices: Arc<dyn NoticePresenter>,
        tasks: Arc<SharedTaskQueue>,
    ) -> Self {
        let inner = Arc::new(ControllerInner {
            list,
            editor,
            strip,
            notices,
            tasks,
            policy: Property::new(ReselectPolicy::default()),
            alive: AtomicBool::new(true),
            subscriptions: Mutex::new(Vec::new()),
        });

        let items = inner.list.items();
        inner.strip.reset_swatches(&items);
        inner.strip.set_highlighted_index(inner.list.current_index());
        if let Some(color) = inner.list.current_value() {
            inner.editor.set_displayed_color(color);
        }

        let subscriptions = Self::connect(&inner);
        *inner.subscriptions.lock() = subscriptions;
        inner.schedule_pointer_update();

        tracing::debug!(
            target: targets::CONTROLLER,
            len = inner.list.len(),
            current = ?inner.list.current_index(),
            "sync controller attached"
        );
        Self { inner }
    }

    /// Set the reselect policy using builder pattern.
    pub fn with_reselect_policy(self, policy: ReselectPolicy) -> Self {
        self.set_reselect_policy(policy);
        self
    }

    pub fn reselect_policy(&self) -> ReselectPolicy {
        self.inner.policy.get()
    }

    pub fn set_reselect_policy(&self, policy: ReselectPolicy) {
        self.inner.policy.set(policy);
    }

    /// The palette list this controller drives.
    pub fn list(&self) -> &Arc<SelectionList<Color>> {
        &self.inner.list
    }

    /// Whether the controller is still attached.
    pub fn is_alive(&self) -> bool {
        self.inner.is_alive()
    }

    /// Detach from every collaborator.
    ///
    /// Pending pointer updates become no-ops. Calling this more than once is
    /// harmless.
    pub fn dispose(&self) {
        if !self.inner.alive.swap(false, Ordering::AcqRel) {
            return;
        }
        let subscriptions = std::mem::take(&mut *self.inner.subscriptions.lock());
        tracing::debug!(
            target: targets::CONTROLLER,
            subscriptions = subscriptions.len(),
            "sync controller disposed"
        );
        drop(subscriptions);
    }

    fn connect(inner: &Arc<ControllerInner>) -> Vec<ConnectionGuard> {
        let weak: Weak<ControllerInner> = Arc::downgrade(inner);
        let mut guards = Vec::with_capacity(7);

        let w = weak.clone();
        guards.push(inner.list.selection_changed.connect_scoped(move |change| {
            if let Some(inner) = w.upgrade() {
                inner.on_selection_changed(change);
            }
        }));

        let w = weak.clone();
        guards.push(inner.list.content_changed.connect_scoped(move |change| {
            if let Some(inner) = w.upgrade() {
                inner.on_content_changed(change);
            }
        }));

        let w = weak.clone();
        guards.push(inner.editor.color_edited().connect_scoped(move |&color| {
            if let Some(inner) = w.upgrade() {
                inner.on_color_edited(color);
            }
        }));

        let w = weak.clone();
        guards.push(inner.editor.remove_requested().connect_scoped(move |_| {
            if let Some(inner) = w.upgrade() {
                inner.on_remove_requested();
            }
        }));

        let w = weak.clone();
        guards.push(inner.editor.duplicate_requested().connect_scoped(move |_| {
            if let Some(inner) = w.upgrade() {
                inner.on_duplicate_requested();
            }
        }));

        let w = weak.clone();
        guards.push(inner.strip.tapped().connect_scoped(move |&index| {
            if let Some(inner) = w.upgrade() {
                inner.list.select(index);
            }
        }));

        let w = weak;
        guards.push(inner.strip.scrolled().connect_scoped(move |_| {
            if let Some(inner) = w.upgrade() {
                inner.update_pointer();
            }
        }));

        guards
    }
}

impl Drop for SyncController {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for SyncController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncController")
            .field("alive", &self.is_alive())
            .field("policy", &self.reselect_policy())
            .field("list", &self.inner.list)
            .finish()
    }
}

static_assertions::assert_impl_all!(SyncController: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::ColorAdjustment;
    use crate::notice::Toast;
    use crate::selection_list::ListConfig;
    use crate::strip::{ColorSwatch, SwatchStrip};

    struct Fixture {
        list: Arc<SelectionList<Color>>,
        editor: Arc<ColorAdjustment>,
        strip: Arc<SwatchStrip<ColorSwatch>>,
        toast: Arc<Toast>,
        tasks: Arc<SharedTaskQueue>,
        controller: SyncController,
    }

    fn fixture(colors: Vec<Color>, config: ListConfig) -> Fixture {
        let list = Arc::new(SelectionList::with_config(colors, config));
        let editor = Arc::new(ColorAdjustment::new());
        let strip = Arc::new(SwatchStrip::<ColorSwatch>::new());
        let toast = Arc::new(Toast::new());
        let tasks = Arc::new(SharedTaskQueue::new());
        let controller = SyncController::new(
            list.clone(),
            editor.clone(),
            strip.clone(),
            toast.clone(),
            tasks.clone(),
        );
        Fixture {
            list,
            editor,
            strip,
            toast,
            tasks,
            controller,
        }
    }

    #[test]
    fn test_attach_syncs_views() {
        let f = fixture(
            vec![Color::RED, Color::GREEN],
            ListConfig::default().with_current_index(1),
        );
        assert_eq!(f.strip.values(), vec![Color::RED, Color::GREEN]);
        assert_eq!(f.strip.highlighted_index(), Some(1));
        assert_eq!(f.editor.edited_color(), Color::GREEN);

        assert_eq!(f.tasks.process_all(), 1);
        assert_eq!(f.editor.pointer_target().map(|t| t.index), Some(1));
    }

    #[test]
    fn test_edit_flows_into_list_and_strip() {
        let f = fixture(vec![Color::RED, Color::GREEN], ListConfig::default());
        f.editor.set_channel(swatchbook_color::Channel::Blue, 255);

        let edited = Color::new(255, 0, 255, 255);
        assert_eq!(f.list.get(0), Some(edited));
        assert_eq!(f.strip.values()[0], edited);
        assert_eq!(f.editor.edited_color(), edited);
    }

    #[test]
    fn test_ignore_policy_keeps_editor() {
        let f = fixture(vec![Color::RED], ListConfig::default());
        f.controller.set_reselect_policy(ReselectPolicy::Ignore);

        f.strip.tap(0);
        assert!(f.editor.is_visible());
    }

    #[test]
    fn test_refusal_shows_notice() {
        let f = fixture(vec![Color::RED], ListConfig::default());
        f.editor.request_remove();

        assert_eq!(f.list.len(), 1);
        assert_eq!(
            f.toast.message(),
            Some(CapacityError::AtMinimum { min_count: 1 }.to_string())
        );
    }

    #[test]
    fn test_dispose_detaches() {
        let f = fixture(vec![Color::RED, Color::GREEN], ListConfig::default());
        f.controller.dispose();
        assert!(!f.controller.is_alive());
        assert_eq!(f.list.selection_changed.connection_count(), 0);
        assert_eq!(f.strip.tapped.connection_count(), 0);

        f.strip.tap(1);
        assert_eq!(f.list.current_index(), Some(0));

        // The attach-time pointer tick is still queued but does nothing.
        assert_eq!(f.tasks.process_all(), 1);
        assert_eq!(f.editor.pointer_target(), None);
    }
}
