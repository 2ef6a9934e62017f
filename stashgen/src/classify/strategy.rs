//! Transfer strategies
//!
//! A strategy names the `get*`/`put*` pair of the runtime helper used to move one field
//! in and out of the persisted container. The exact-shape table is closed: it mirrors
//! the container's primitive persistence API one entry per method pair.

use serde::Serialize;
use stashgen_macros::StrategyTable;
use strum::{Display, EnumIter};

/// How one field is moved in and out of the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, StrategyTable)]
pub enum TransferStrategy {
    /// Primitive `boolean`
    #[strategy(shape = "boolean")]
    Boolean,
    /// Primitive array `boolean[]`
    #[strategy(shape = "boolean[]")]
    BooleanArray,
    /// Boxed `java.lang.Boolean`
    #[strategy(shape = "java.lang.Boolean")]
    BoxedBoolean,
    /// Primitive `byte`
    #[strategy(shape = "byte")]
    Byte,
    /// Primitive array `byte[]`
    #[strategy(shape = "byte[]")]
    ByteArray,
    /// Boxed `java.lang.Byte`
    #[strategy(shape = "java.lang.Byte")]
    BoxedByte,
    /// Primitive `char`
    #[strategy(shape = "char")]
    Char,
    /// Primitive array `char[]`
    #[strategy(shape = "char[]")]
    CharArray,
    /// Boxed `java.lang.Character`
    #[strategy(shape = "java.lang.Character")]
    BoxedChar,
    /// Primitive `double`
    #[strategy(shape = "double")]
    Double,
    /// Primitive array `double[]`
    #[strategy(shape = "double[]")]
    DoubleArray,
    /// Boxed `java.lang.Double`
    #[strategy(shape = "java.lang.Double")]
    BoxedDouble,
    /// Primitive `float`
    #[strategy(shape = "float")]
    Float,
    /// Primitive array `float[]`
    #[strategy(shape = "float[]")]
    FloatArray,
    /// Boxed `java.lang.Float`
    #[strategy(shape = "java.lang.Float")]
    BoxedFloat,
    /// Primitive `int`
    #[strategy(shape = "int")]
    Int,
    /// Primitive array `int[]`
    #[strategy(shape = "int[]")]
    IntArray,
    /// Boxed `java.lang.Integer`
    #[strategy(shape = "java.lang.Integer")]
    BoxedInt,
    /// Primitive `long`
    #[strategy(shape = "long")]
    Long,
    /// Primitive array `long[]`
    #[strategy(shape = "long[]")]
    LongArray,
    /// Boxed `java.lang.Long`
    #[strategy(shape = "java.lang.Long")]
    BoxedLong,
    /// Primitive `short`
    #[strategy(shape = "short")]
    Short,
    /// Primitive array `short[]`
    #[strategy(shape = "short[]")]
    ShortArray,
    /// Boxed `java.lang.Short`
    #[strategy(shape = "java.lang.Short")]
    BoxedShort,
    /// `java.lang.CharSequence`
    #[strategy(shape = "java.lang.CharSequence")]
    CharSequence,
    /// `java.lang.CharSequence[]`
    #[strategy(shape = "java.lang.CharSequence[]")]
    CharSequenceArray,
    /// `java.lang.String`
    #[strategy(shape = "java.lang.String")]
    String,
    /// `java.lang.String[]`
    #[strategy(shape = "java.lang.String[]")]
    StringArray,
    /// `java.util.ArrayList<java.lang.CharSequence>`
    #[strategy(shape = "java.util.ArrayList<java.lang.CharSequence>")]
    CharSequenceArrayList,
    /// `java.util.ArrayList<java.lang.Integer>`
    #[strategy(shape = "java.util.ArrayList<java.lang.Integer>")]
    IntegerArrayList,
    /// `java.util.ArrayList<java.lang.String>`
    #[strategy(shape = "java.util.ArrayList<java.lang.String>")]
    StringArrayList,
    /// `android.os.Bundle`
    #[strategy(shape = "android.os.Bundle")]
    Bundle,
    /// `android.os.Parcelable[]`
    #[strategy(shape = "android.os.Parcelable[]")]
    ParcelableArray,

    // Capability strategies, matched structurally in this order after the table
    /// Any type assignable to the structured transferable capability
    #[strategy(op = "Parcelable")]
    StructuredTransferable,
    /// The list type holding exactly the structured transferable capability
    #[strategy(op = "ParcelableArrayList")]
    StructuredTransferableList,
    /// The sparse map type holding a structured transferable type
    #[strategy(op = "SparseParcelableArray")]
    SparseStructuredTransferableMap,
    /// Any type assignable to the serializable capability
    Serializable,
}

impl TransferStrategy {
    /// Name of the helper operation reading the field from the container
    pub fn retrieve_op(self) -> String {
        format!("get{}", self.op_suffix())
    }

    /// Name of the helper operation writing the field into the container
    pub fn store_op(self) -> String {
        format!("put{}", self.op_suffix())
    }
}
