// SPDX-License-Identifier: MIT

#[macro_export]
/// Defines a set of GPT partition types, along with associated constants, predicates, and an enum for partition kinds.
///
/// This macro generates:
/// - A `Guid` constant for each partition type.
/// - A function to check if a partition entry matches a given type.
/// - An enum `PartitionKind` representing all defined partition types and an `Unknown` variant for unrecognized GUIDs.
/// - Conversions between `Guid` and `PartitionKind`, and a `Display` implementation.
///
/// # Example
/// ```rust
/// use gptpart::define_partition_types;
/// use gptpart::guid::Guid;
///
/// define_partition_types! {
///     EFI => "EFI System Partition", Guid::from_fields(0xC12A7328, 0xF81F, 0x11D2, [0xBA, 0x4B, 0x00, 0xA0, 0xC9, 0x3E, 0xC9, 0x3B]),
/// }
///
/// assert_eq!(PartitionKind::from_guid(&GPT_PARTITION_TYPE_EFI), PartitionKind::EFI);
/// ```
///
/// # Parameters
/// - `$name`: Identifier for the partition type (used for enum variant and function/constant names).
/// - `$desc`: Description string for the partition type.
/// - `$guid`: const expression of type `Guid` (canonical field values).
///
/// # Generated Items
/// For each partition type:
/// - `pub const GPT_PARTITION_TYPE_<NAME>: Guid`
/// - `pub fn is_<name>_partition(entry: &PartitionEntry) -> bool`
///
/// # Note
/// Identifier concatenation goes through the `paste` crate, re-exported by this crate.
macro_rules! define_partition_types {
    (
        $(
            $name:ident => $desc:expr, $guid:expr
        ),+ $(,)?
    ) => {
        $crate::__paste::paste! {
            $(
                #[doc = $desc]
                pub const [<GPT_PARTITION_TYPE_ $name:upper>]: $crate::guid::Guid = $guid;

                #[doc = concat!("Checks if a GPT partition is of type: ", $desc)]
                pub fn [<is_ $name:lower _partition>](
                    entry: &$crate::entry::PartitionEntry,
                ) -> bool {
                    entry.type_guid == [<GPT_PARTITION_TYPE_ $name:upper>]
                }
            )+

            #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub enum PartitionKind {
                $($name,)+
                Unknown($crate::guid::Guid),
            }

            impl PartitionKind {
                pub fn from_guid(guid: &$crate::guid::Guid) -> Self {
                    match guid {
                        $(g if *g == [<GPT_PARTITION_TYPE_ $name:upper>] => Self::$name,)+
                        other => Self::Unknown(*other),
                    }
                }

                pub fn as_guid(&self) -> $crate::guid::Guid {
                    match self {
                        $(Self::$name => [<GPT_PARTITION_TYPE_ $name:upper>],)+
                        Self::Unknown(g) => *g,
                    }
                }

                #[inline]
                pub fn is_known(&self) -> bool {
                    !matches!(self, Self::Unknown(_))
                }
            }

            impl core::fmt::Display for PartitionKind {
                fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    match self {
                        $(Self::$name => f.write_str($desc),)+
                        Self::Unknown(guid) => write!(f, "Unknown ({})", guid),
                    }
                }
            }
        }
    };
}
