//! Shape dispatch for container types.
//!
//! A [`Container`] names its [`Shape`], its element type, how elements are
//! inserted while decoding and how they are visited while encoding. The
//! format itself comes from the registry, so the same container type can be
//! written with different brackets under different [`CodecOptions`].
//!
//! | Type | Shape | Element |
//! |------|-------|---------|
//! | `Vec<T>`, `VecDeque<T>` | [`Shape::SEQUENCE`] | `T` |
//! | `LinkedList<T>` | [`Shape::LINKED_SEQUENCE`] | `T` |
//! | `HashSet<T>`, `BTreeSet<T>`, `IndexSet<T>` | [`Shape::SET`] | `T` |
//! | `HashMap<K, V>`, `BTreeMap<K, V>`, `IndexMap<K, V>` | [`Shape::MAPPING`] | `(K, V)` |
//!
//! Mappings insert with overwrite: for a repeated key the last entry wins.
//!
//! [`CodecOptions`]: crate::CodecOptions

use crate::de::Deserializer;
use crate::element::Element;
use crate::format::{Shape, StopSet};
use crate::ser::{SeqWriter, Serializer};
use crate::Result;
use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::{BuildHasher, Hash};

/// A homogeneous container that can be written and read element by element.
///
/// # Examples
///
/// Adding a shape for a custom collection:
///
/// ```rust
/// use container_codec::{
///     CodecOptions, Container, Deserializer, FormatSpec, Result, SeqWriter, Serializer, Shape,
/// };
///
/// #[derive(Default, Debug, PartialEq)]
/// struct Stack(Vec<u32>);
///
/// impl Container for Stack {
///     const SHAPE: Shape = Shape::new("stack");
///     type Item = u32;
///
///     fn insert_item(&mut self, item: u32) {
///         self.0.push(item);
///     }
///
///     fn write_items(&self, writer: &mut SeqWriter<'_, '_>) -> Result<()> {
///         self.0.iter().try_for_each(|item| writer.element(item))
///     }
/// }
///
/// let options = CodecOptions::new().with_format(Stack::SHAPE, FormatSpec::new('[', ']', ';'));
///
/// let mut stack = Stack::default();
/// let mut de = Deserializer::with_options("[1;2;3]", &options);
/// de.decode_into(&mut stack).unwrap();
/// assert_eq!(stack, Stack(vec![1, 2, 3]));
///
/// let mut ser = Serializer::new(&options);
/// ser.write_container(&stack).unwrap();
/// assert_eq!(ser.into_inner(), "[1;2;3]");
/// ```
pub trait Container {
    /// The shape whose registered format this container is written in.
    const SHAPE: Shape;

    /// The element decoded for each entry.
    type Item: Element;

    /// Inserts one decoded element.
    fn insert_item(&mut self, item: Self::Item);

    /// Visits every element in traversal order.
    ///
    /// # Errors
    ///
    /// Propagates the first element encoding error.
    fn write_items(&self, writer: &mut SeqWriter<'_, '_>) -> Result<()>;
}

/// Implements [`Element`] for a container by dispatching through its shape.
macro_rules! container_element {
    ([$($generics:tt)*] $ty:ty) => {
        impl<$($generics)*> Element for $ty {
            fn encode(&self, ser: &mut Serializer<'_>, _stop: StopSet) -> Result<()> {
                ser.write_container(self)
            }

            fn decode(de: &mut Deserializer<'_>, _stop: StopSet) -> Result<Self> {
                let mut container = Self::default();
                de.decode_into(&mut container)?;
                Ok(container)
            }
        }
    };
}

impl<T: Element> Container for Vec<T> {
    const SHAPE: Shape = Shape::SEQUENCE;
    type Item = T;

    fn insert_item(&mut self, item: T) {
        self.push(item);
    }

    fn write_items(&self, writer: &mut SeqWriter<'_, '_>) -> Result<()> {
        self.iter().try_for_each(|item| writer.element(item))
    }
}

impl<T: Element> Container for VecDeque<T> {
    const SHAPE: Shape = Shape::SEQUENCE;
    type Item = T;

    fn insert_item(&mut self, item: T) {
        self.push_back(item);
    }

    fn write_items(&self, writer: &mut SeqWriter<'_, '_>) -> Result<()> {
        self.iter().try_for_each(|item| writer.element(item))
    }
}

impl<T: Element> Container for LinkedList<T> {
    const SHAPE: Shape = Shape::LINKED_SEQUENCE;
    type Item = T;

    fn insert_item(&mut self, item: T) {
        self.push_back(item);
    }

    fn write_items(&self, writer: &mut SeqWriter<'_, '_>) -> Result<()> {
        self.iter().try_for_each(|item| writer.element(item))
    }
}

impl<T, S> Container for HashSet<T, S>
where
    T: Element + Eq + Hash,
    S: BuildHasher,
{
    const SHAPE: Shape = Shape::SET;
    type Item = T;

    fn insert_item(&mut self, item: T) {
        self.insert(item);
    }

    fn write_items(&self, writer: &mut SeqWriter<'_, '_>) -> Result<()> {
        self.iter().try_for_each(|item| writer.element(item))
    }
}

impl<T: Element + Ord> Container for BTreeSet<T> {
    const SHAPE: Shape = Shape::SET;
    type Item = T;

    fn insert_item(&mut self, item: T) {
        self.insert(item);
    }

    fn write_items(&self, writer: &mut SeqWriter<'_, '_>) -> Result<()> {
        self.iter().try_for_each(|item| writer.element(item))
    }
}

impl<T, S> Container for IndexSet<T, S>
where
    T: Element + Eq + Hash,
    S: BuildHasher,
{
    const SHAPE: Shape = Shape::SET;
    type Item = T;

    fn insert_item(&mut self, item: T) {
        self.insert(item);
    }

    fn write_items(&self, writer: &mut SeqWriter<'_, '_>) -> Result<()> {
        self.iter().try_for_each(|item| writer.element(item))
    }
}

impl<K, V, S> Container for HashMap<K, V, S>
where
    K: Element + Eq + Hash,
    V: Element,
    S: BuildHasher,
{
    const SHAPE: Shape = Shape::MAPPING;
    type Item = (K, V);

    fn insert_item(&mut self, (key, value): (K, V)) {
        self.insert(key, value);
    }

    fn write_items(&self, writer: &mut SeqWriter<'_, '_>) -> Result<()> {
        self.iter().try_for_each(|(key, value)| writer.pair(key, value))
    }
}

impl<K: Element + Ord, V: Element> Container for BTreeMap<K, V> {
    const SHAPE: Shape = Shape::MAPPING;
    type Item = (K, V);

    fn insert_item(&mut self, (key, value): (K, V)) {
        self.insert(key, value);
    }

    fn write_items(&self, writer: &mut SeqWriter<'_, '_>) -> Result<()> {
        self.iter().try_for_each(|(key, value)| writer.pair(key, value))
    }
}

impl<K, V, S> Container for IndexMap<K, V, S>
where
    K: Element + Eq + Hash,
    V: Element,
    S: BuildHasher,
{
    const SHAPE: Shape = Shape::MAPPING;
    type Item = (K, V);

    fn insert_item(&mut self, (key, value): (K, V)) {
        self.insert(key, value);
    }

    fn write_items(&self, writer: &mut SeqWriter<'_, '_>) -> Result<()> {
        self.iter().try_for_each(|(key, value)| writer.pair(key, value))
    }
}

container_element!([T: Element] Vec<T>);
container_element!([T: Element] VecDeque<T>);
container_element!([T: Element] LinkedList<T>);
container_element!([T: Element + Eq + Hash, S: BuildHasher + Default] HashSet<T, S>);
container_element!([T: Element + Ord] BTreeSet<T>);
container_element!([T: Element + Eq + Hash, S: BuildHasher + Default] IndexSet<T, S>);
container_element!([K: Element + Eq + Hash, V: Element, S: BuildHasher + Default] HashMap<K, V, S>);
container_element!([K: Element + Ord, V: Element] BTreeMap<K, V>);
container_element!([K: Element + Eq + Hash, V: Element, S: BuildHasher + Default] IndexMap<K, V, S>);
