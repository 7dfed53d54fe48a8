//! Performance variable descriptors.
//!
//! MPI_T reports class, verbosity, binding and datatype as
//! implementation-defined constants. The C shim translates them to the
//! stable tags below (see `csrc/mpit_shim.h`); unknown constants arrive as
//! `-1` and are kept as `None`.

/// Generates `from_tag` for a `#[repr(i32)]` tag enum.
macro_rules! impl_from_tag {
    ($ty:ty { $($variant:ident),+ $(,)? }) => {
        impl $ty {
            /// Convert a shim tag into the enum, `None` for unknown tags.
            pub fn from_tag(tag: i32) -> Option<Self> {
                [$(<$ty>::$variant),+].into_iter().find(|v| *v as i32 == tag)
            }
        }
    };
}

/// Verbosity level of a performance variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Verbosity {
    /// Basic information of interest to users
    UserBasic = 0,
    /// Detailed information of interest to users
    UserDetail = 1,
    /// All remaining information of interest to users
    UserAll = 2,
    /// Basic information for tuning
    TunerBasic = 3,
    /// Detailed information for tuning
    TunerDetail = 4,
    /// All remaining information for tuning
    TunerAll = 5,
    /// Basic low-level information for MPI developers
    MpiDevBasic = 6,
    /// Detailed low-level information for MPI developers
    MpiDevDetail = 7,
    /// All remaining low-level information for MPI developers
    MpiDevAll = 8,
}

impl_from_tag!(Verbosity {
    UserBasic,
    UserDetail,
    UserAll,
    TunerBasic,
    TunerDetail,
    TunerAll,
    MpiDevBasic,
    MpiDevDetail,
    MpiDevAll,
});

/// Class of a performance variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum PvarClass {
    /// A set of discrete states
    State = 0,
    /// Utilization level of a resource
    Level = 1,
    /// Fixed size of a resource
    Size = 2,
    /// Utilization of a resource as a fraction
    Percentage = 3,
    /// High watermark of a resource
    HighWatermark = 4,
    /// Low watermark of a resource
    LowWatermark = 5,
    /// Number of occurrences of an event
    Counter = 6,
    /// Aggregate value over a set of events
    Aggregate = 7,
    /// Time spent executing
    Timer = 8,
    /// Anything that fits no other class
    Generic = 9,
}

impl_from_tag!(PvarClass {
    State,
    Level,
    Size,
    Percentage,
    HighWatermark,
    LowWatermark,
    Counter,
    Aggregate,
    Timer,
    Generic,
});

/// MPI object type a performance variable is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Binding {
    /// Not bound to any object
    NoObject = 0,
    /// Bound to a communicator
    Comm = 1,
    /// Bound to a datatype
    Datatype = 2,
    /// Bound to an error handler
    Errhandler = 3,
    /// Bound to a file
    File = 4,
    /// Bound to a group
    Group = 5,
    /// Bound to a reduction operation
    Op = 6,
    /// Bound to a request
    Request = 7,
    /// Bound to a window
    Win = 8,
    /// Bound to a message
    Message = 9,
    /// Bound to an info object
    Info = 10,
}

impl_from_tag!(Binding {
    NoObject, Comm, Datatype, Errhandler, File, Group, Op, Request, Win, Message, Info,
});

/// Datatype a performance variable is read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum PvarDatatype {
    /// `MPI_INT`
    Int = 0,
    /// `MPI_UNSIGNED`
    Unsigned = 1,
    /// `MPI_UNSIGNED_LONG`
    UnsignedLong = 2,
    /// `MPI_UNSIGNED_LONG_LONG`
    UnsignedLongLong = 3,
    /// `MPI_COUNT`
    Count = 4,
    /// `MPI_CHAR`
    Char = 5,
    /// `MPI_DOUBLE`
    Double = 6,
}

impl_from_tag!(PvarDatatype {
    Int,
    Unsigned,
    UnsignedLong,
    UnsignedLongLong,
    Count,
    Char,
    Double,
});

/// Descriptor of one exported performance variable.
///
/// Fetched per index during enumeration and not retained by the registrar
/// beyond logging.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PvarInfo {
    /// Variable name
    pub name: String,
    /// Human readable description
    pub description: String,
    /// Verbosity level, `None` if the implementation reported an unknown value
    pub verbosity: Option<Verbosity>,
    /// Variable class
    pub class: Option<PvarClass>,
    /// Datatype the value is read as
    pub datatype: Option<PvarDatatype>,
    /// Whether the variable is described by an enumeration
    pub has_enumtype: bool,
    /// Object binding
    pub binding: Option<Binding>,
    /// Whether the variable can be written/reset
    pub readonly: bool,
    /// Whether the variable is always active
    pub continuous: bool,
    /// Whether the variable supports atomic read-and-reset
    pub atomic: bool,
}
