#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use alloc::string::String;

use crate::virtual_list::RenderRecord;

#[cfg(feature = "std")]
pub(crate) type RecordMap<T> = HashMap<String, RenderRecord<T>>;
#[cfg(not(feature = "std"))]
pub(crate) type RecordMap<T> = BTreeMap<String, RenderRecord<T>>;
