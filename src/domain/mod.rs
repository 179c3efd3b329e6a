//! Core data model: shapes, data nodes, and examples.

pub mod data_node;
pub mod example;
pub mod shape;

pub use data_node::DataNode;
pub use example::{Example, GeneratedExample};
pub use shape::{
    AnyShape, ArrayShape, FileShape, NodeShape, PropertyShape, ScalarShape, ScalarType,
    SchemaShape, Shape, ShapeKind, TupleShape, UnionShape, XmlSerialization,
};
