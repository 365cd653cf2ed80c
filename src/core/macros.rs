/******************************************\
|==========================================|
|          Macro: impl_enum_index          |
|==========================================|
\******************************************/

/// Generates `index`, `from_index` and `iter` for a fieldless enum.
///
/// The enum must provide `NUM: usize` and `ALL: [Self; Self::NUM]`, with `ALL`
/// listed in discriminant order. Conversions go through `ALL`, so no
/// transmutes are involved.
#[macro_export]
macro_rules! impl_enum_index {
    ($enum_name:ident) => {
        impl $enum_name {
            #[doc=concat!("Converts ", stringify!($enum_name), " to its usize index")]
            #[inline]
            pub const fn index(&self) -> usize {
                *self as usize
            }

            #[doc=concat!("Converts an index to ", stringify!($enum_name), ", `None` when out of range")]
            #[inline]
            pub const fn from_index(index: usize) -> Option<Self> {
                if index < Self::NUM {
                    Some(Self::ALL[index])
                } else {
                    None
                }
            }

            #[doc=concat!("Returns iterator for all the elements in ", stringify!($enum_name))]
            pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
                Self::ALL.into_iter()
            }
        }
    };
}
