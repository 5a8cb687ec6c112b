use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell};
use core::fmt;

use virtual_list::{Anchor, Container, Px, Spacer};

/// Computes the rendered height of a row's content.
pub type Layout<T> = Rc<dyn Fn(&T) -> f64>;

/// A rendered row: shared content plus the key it was tagged with.
///
/// Rows compare by identity, so two rows with equal content are still different targets.
pub struct Row<T>(Rc<RowInner<T>>);

struct RowInner<T> {
    content: RefCell<T>,
    key: RefCell<String>,
}

impl<T> Row<T> {
    pub fn new(content: T) -> Self {
        Self(Rc::new(RowInner {
            content: RefCell::new(content),
            key: RefCell::new(String::new()),
        }))
    }

    pub fn content(&self) -> Ref<'_, T> {
        self.0.content.borrow()
    }

    /// Mutates the content in place. Follow up with
    /// [`virtual_list::VirtualList::notify_item_mutated`] so the new size is measured.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.0.content.borrow_mut());
    }

    /// The key set by the list when the row was mounted (empty before that).
    pub fn key(&self) -> Ref<'_, str> {
        Ref::map(self.0.key.borrow(), String::as_str)
    }
}

impl<T> Clone for Row<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> PartialEq for Row<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: fmt::Debug> fmt::Debug for Row<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("key", &&*self.key())
            .field("content", &*self.content())
            .finish()
    }
}

enum Child<T> {
    TopSpacer,
    BottomSpacer,
    Row(Row<T>),
}

/// A retained child list: `[top spacer, rows..., bottom spacer]`.
///
/// Sizes come from the `layout` closure; spacer heights are whatever the list last wrote.
pub struct RetainedContainer<T> {
    children: Vec<Child<T>>,
    layout: Layout<T>,
    top: Px,
    bottom: Px,
}

impl<T> RetainedContainer<T> {
    pub fn new(layout: impl Fn(&T) -> f64 + 'static) -> Self {
        Self {
            children: alloc::vec![Child::TopSpacer, Child::BottomSpacer],
            layout: Rc::new(layout),
            top: Px::ZERO,
            bottom: Px::ZERO,
        }
    }

    /// Number of attached rows.
    pub fn len(&self) -> usize {
        self.rows().count()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().next().is_none()
    }

    /// Attached rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &Row<T>> {
        self.children.iter().filter_map(|c| match c {
            Child::Row(row) => Some(row),
            _ => None,
        })
    }

    pub fn spacer_height(&self, spacer: Spacer) -> Px {
        match spacer {
            Spacer::Top => self.top,
            Spacer::Bottom => self.bottom,
        }
    }

    /// Spacers plus the laid-out height of every attached row.
    pub fn content_height(&self) -> f64 {
        let rows: f64 = self.rows().map(|row| self.measure(row)).sum();
        self.top.get() + rows + self.bottom.get()
    }

    fn position(&self, anchor: Anchor<'_, Row<T>>) -> Option<usize> {
        self.children.iter().position(|c| match (anchor, c) {
            (Anchor::TopSpacer, Child::TopSpacer) => true,
            (Anchor::BottomSpacer, Child::BottomSpacer) => true,
            (Anchor::Target(target), Child::Row(row)) => row == target,
            _ => false,
        })
    }
}

impl<T> Container for RetainedContainer<T> {
    type Target = Row<T>;

    fn ensure_spacers(&mut self) {
        if self.position(Anchor::TopSpacer).is_none() {
            self.children.insert(0, Child::TopSpacer);
        }
        if self.position(Anchor::BottomSpacer).is_none() {
            self.children.push(Child::BottomSpacer);
        }
    }

    fn insert_before(&mut self, target: &Row<T>, anchor: Anchor<'_, Row<T>>) {
        self.remove(target);
        let at = match self.position(anchor) {
            Some(at) => at,
            None => self.children.len().saturating_sub(1),
        };
        self.children.insert(at, Child::Row(target.clone()));
    }

    fn next_sibling(&self, anchor: Anchor<'_, Row<T>>) -> Option<Row<T>> {
        let at = self.position(anchor)?;
        match self.children.get(at + 1) {
            Some(Child::Row(row)) => Some(row.clone()),
            _ => None,
        }
    }

    fn remove(&mut self, target: &Row<T>) {
        self.children
            .retain(|c| !matches!(c, Child::Row(row) if row == target));
    }

    fn is_attached(&self, target: &Row<T>) -> bool {
        self.position(Anchor::Target(target)).is_some()
    }

    fn measure(&self, target: &Row<T>) -> f64 {
        (self.layout)(&target.content())
    }

    fn set_spacer_height(&mut self, spacer: Spacer, height: Px) {
        match spacer {
            Spacer::Top => self.top = height,
            Spacer::Bottom => self.bottom = height,
        }
    }

    fn tag(&mut self, target: &Row<T>, key: &str) {
        let mut slot = target.0.key.borrow_mut();
        slot.clear();
        slot.push_str(key);
    }
}

impl<T> fmt::Debug for RetainedContainer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetainedContainer")
            .field("rows", &self.len())
            .field("top", &self.top)
            .field("bottom", &self.bottom)
            .finish_non_exhaustive()
    }
}
