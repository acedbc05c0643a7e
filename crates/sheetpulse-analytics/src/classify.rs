//! Column role classification.
//!
//! Assigns semantic roles (task name, start, finish, duration, predecessor,
//! assignee, status) to columns by inspecting titles and declared types.
//! This is a best-effort tagger over real-world column naming, not a
//! guaranteed-correct inference: the rules live in a declarative signature
//! table so new roles can be added without touching call sites.
//!
//! Classification is total. A role with no matching column is simply absent
//! from the resulting map; downstream views treat that as "feature
//! unavailable for this sheet", never as an error.

use sheetpulse_core::{ColumnDescriptor, ColumnRole, ColumnRoleMap, ColumnType};

/// Declared-type predicate used by a signature.
#[derive(Clone, Copy, Debug)]
enum TypeClass {
    DateLike,
    Duration,
    Predecessor,
    ContactLike,
    PicklistLike,
}

impl TypeClass {
    fn matches(self, column_type: ColumnType) -> bool {
        match self {
            Self::DateLike => column_type.is_date_like(),
            Self::Duration => column_type == ColumnType::Duration,
            Self::Predecessor => column_type == ColumnType::Predecessor,
            Self::ContactLike => column_type.is_contact_like(),
            Self::PicklistLike => column_type.is_picklist_like(),
        }
    }
}

/// One way a column can match a role.
#[derive(Clone, Copy, Debug)]
enum Signature {
    /// The sheet's primary column
    Primary,
    /// Title contains the substring, case-insensitive
    TitleContains(&'static str),
    /// Declared type matches the class
    Typed(TypeClass),
    /// Declared type matches the class AND title contains the substring
    TypedTitle(TypeClass, &'static str),
}

impl Signature {
    fn matches(self, column: &ColumnDescriptor) -> bool {
        match self {
            Self::Primary => column.is_primary,
            Self::TitleContains(needle) => title_contains(&column.title, needle),
            Self::Typed(class) => class.matches(column.column_type),
            Self::TypedTitle(class, needle) => {
                class.matches(column.column_type) && title_contains(&column.title, needle)
            }
        }
    }
}

/// The role-signature table. For each role, signatures are alternatives in
/// priority order; within one signature, columns are scanned in declaration
/// order and the first match wins.
const ROLE_RULES: &[(ColumnRole, &[Signature])] = &[
    (
        ColumnRole::TaskName,
        &[Signature::Primary, Signature::TitleContains("task")],
    ),
    (
        ColumnRole::Start,
        &[Signature::TypedTitle(TypeClass::DateLike, "start")],
    ),
    (
        ColumnRole::Finish,
        &[Signature::TypedTitle(TypeClass::DateLike, "finish")],
    ),
    (ColumnRole::Duration, &[Signature::Typed(TypeClass::Duration)]),
    (
        ColumnRole::Predecessor,
        &[Signature::Typed(TypeClass::Predecessor)],
    ),
    (
        ColumnRole::Assignee,
        &[Signature::Typed(TypeClass::ContactLike)],
    ),
    (
        ColumnRole::Status,
        &[
            Signature::TitleContains("status"),
            Signature::Typed(TypeClass::PicklistLike),
        ],
    ),
];

fn title_contains(title: &str, needle: &str) -> bool {
    title.to_lowercase().contains(needle)
}

/// Classify columns into semantic roles.
///
/// Each role maps to at most one column; a column can serve several roles
/// (a primary column named "Start Status" is still only the task name,
/// because typed signatures also look at the declared type).
pub fn classify_columns(columns: &[ColumnDescriptor]) -> ColumnRoleMap {
    let mut roles = ColumnRoleMap::new();

    for (role, signatures) in ROLE_RULES {
        'role: for signature in *signatures {
            for column in columns {
                if signature.matches(column) {
                    roles.assign(*role, column.title.clone());
                    break 'role;
                }
            }
        }
    }

    roles
}
