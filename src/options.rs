use alloc::rc::Rc;
use alloc::string::{String, ToString};

use crate::{Container, HostError, MountMeta, Range};

/// Returns the current logical length of the list.
pub type ItemCountProvider = Rc<dyn Fn() -> usize>;

/// Creates a fresh render target for an index.
pub type RenderItem<T> = Rc<dyn Fn(usize) -> Result<T, HostError>>;

/// Returns a stable identity for the item at an index.
pub type ItemKeyProvider = Rc<dyn Fn(usize) -> String>;

/// Observer fired after each applied window.
pub type RangeChangeCallback = Rc<dyn Fn(Range) -> Result<(), HostError>>;

/// Lifecycle hook fired when a target is mounted or unmounted.
pub type LifecycleHook<T> = Rc<dyn Fn(usize, &T, MountMeta<'_>) -> Result<(), HostError>>;

pub const DEFAULT_ESTIMATED_ITEM_HEIGHT: f64 = 80.0;
pub const DEFAULT_OVERSCAN: usize = 5;

/// Configuration for [`crate::VirtualList`].
///
/// Closures are stored in `Rc`s: the list is single-threaded and cloning options is cheap.
pub struct VirtualListOptions<C: Container> {
    /// Where render targets are mounted. Construction fails without one.
    pub container: Option<C>,
    pub get_item_count: ItemCountProvider,
    pub render_item: RenderItem<C::Target>,
    /// Defaults to the index rendered as a decimal string.
    pub get_item_key: ItemKeyProvider,
    /// Seed size for unmeasured items, and the unit of `overscan`.
    pub estimated_item_height: f64,
    /// Extra items buffered beyond the viewport on both sides (in estimated heights).
    pub overscan: usize,
    pub on_range_change: Option<RangeChangeCallback>,
    pub on_mount: Option<LifecycleHook<C::Target>>,
    pub on_unmount: Option<LifecycleHook<C::Target>>,
    /// When `false`, both spacers are kept at zero height.
    pub use_spacers: bool,
}

impl<C: Container> VirtualListOptions<C> {
    /// Creates options with the two required callbacks and defaults for everything else.
    ///
    /// The container still has to be supplied with [`Self::with_container`].
    pub fn new(
        get_item_count: impl Fn() -> usize + 'static,
        render_item: impl Fn(usize) -> Result<C::Target, HostError> + 'static,
    ) -> Self {
        Self {
            container: None,
            get_item_count: Rc::new(get_item_count),
            render_item: Rc::new(render_item),
            get_item_key: Rc::new(|i: usize| i.to_string()),
            estimated_item_height: DEFAULT_ESTIMATED_ITEM_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            on_range_change: None,
            on_mount: None,
            on_unmount: None,
            use_spacers: true,
        }
    }

    pub fn with_container(mut self, container: C) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_get_item_key(mut self, get_item_key: impl Fn(usize) -> String + 'static) -> Self {
        self.get_item_key = Rc::new(get_item_key);
        self
    }

    pub fn with_estimated_item_height(mut self, estimated_item_height: f64) -> Self {
        self.estimated_item_height = estimated_item_height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_on_range_change(
        mut self,
        on_range_change: impl Fn(Range) -> Result<(), HostError> + 'static,
    ) -> Self {
        self.on_range_change = Some(Rc::new(on_range_change));
        self
    }

    pub fn with_on_mount(
        mut self,
        on_mount: impl Fn(usize, &C::Target, MountMeta<'_>) -> Result<(), HostError> + 'static,
    ) -> Self {
        self.on_mount = Some(Rc::new(on_mount));
        self
    }

    pub fn with_on_unmount(
        mut self,
        on_unmount: impl Fn(usize, &C::Target, MountMeta<'_>) -> Result<(), HostError> + 'static,
    ) -> Self {
        self.on_unmount = Some(Rc::new(on_unmount));
        self
    }

    pub fn with_use_spacers(mut self, use_spacers: bool) -> Self {
        self.use_spacers = use_spacers;
        self
    }
}

impl<C: Container + Clone> Clone for VirtualListOptions<C> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            get_item_count: Rc::clone(&self.get_item_count),
            render_item: Rc::clone(&self.render_item),
            get_item_key: Rc::clone(&self.get_item_key),
            estimated_item_height: self.estimated_item_height,
            overscan: self.overscan,
            on_range_change: self.on_range_change.clone(),
            on_mount: self.on_mount.clone(),
            on_unmount: self.on_unmount.clone(),
            use_spacers: self.use_spacers,
        }
    }
}

impl<C: Container> core::fmt::Debug for VirtualListOptions<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualListOptions")
            .field("has_container", &self.container.is_some())
            .field("estimated_item_height", &self.estimated_item_height)
            .field("overscan", &self.overscan)
            .field("use_spacers", &self.use_spacers)
            .field("on_range_change", &self.on_range_change.is_some())
            .field("on_mount", &self.on_mount.is_some())
            .field("on_unmount", &self.on_unmount.is_some())
            .finish_non_exhaustive()
    }
}
