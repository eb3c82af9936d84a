//! The closed sets of codes shared by the whole model.
//!
//! Every enum maps to the integer code the downstream engine expects through
//! `code()` and back through `from_code()`.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_coded_enum {
    ( $(#[$meta:meta])* $name:ident { $( $variant:ident = $code:expr => $label:expr ),* $(,)? } ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $( $variant, )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )* ];

            pub fn code(self) -> u8 {
                match self {
                    $( $name::$variant => $code, )*
                }
            }

            pub fn from_code(code: i64) -> Option<Self> {
                match code {
                    $( c if c == $code as i64 => Some($name::$variant), )*
                    _ => None,
                }
            }

            /// Parses the textual form of the integer code, e.g. `"1"`.
            pub fn parse_code(raw: &str) -> Option<Self> {
                raw.trim().parse::<i64>().ok().and_then(Self::from_code)
            }

            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

define_coded_enum! {
    ActivityType {
        Task = 0 => "TASK",
        Subprocess = 1 => "SUBPROCESS",
    }
}

define_coded_enum! {
    TaskType {
        None = 0 => "NONE",
        User = 1 => "USER",
        Service = 2 => "SERVICE",
        Event = 3 => "EVENT",
    }
}

define_coded_enum! {
    /// How a task interacts with its application.
    TaskBehavior {
        Send = 0 => "SEND",
        SendReceive = 1 => "SENDRECEIVE",
        Receive = 2 => "RECEIVE",
    }
}

define_coded_enum! {
    GatewayType {
        Xor = 0 => "XOR",
        Or = 1 => "OR",
        And = 2 => "AND",
    }
}

define_coded_enum! {
    Direction {
        In = 0 => "IN",
        Out = 1 => "OUT",
    }
}

define_coded_enum! {
    /// Comparator of a transition condition.
    Operator {
        Eq = 0 => "==",
        Lt = 1 => "<",
        Gt = 2 => ">",
        Lte = 3 => "<=",
        Gte = 4 => ">=",
        Neq = 5 => "!=",
    }
}

define_coded_enum! {
    /// The user-facing type of a data-store field.
    ParameterType {
        Boolean = 0 => "BOOLEAN",
        String = 1 => "STRING",
        Number = 2 => "NUMBER",
        Date = 3 => "DATE",
        Datetime = 4 => "DATETIME",
        MonetaryAmount = 5 => "MONETARY_AMOUNT",
        UserOrganization = 6 => "USER_ORGANIZATION",
        ContractAddress = 7 => "CONTRACT_ADDRESS",
        SigningParty = 8 => "SIGNING_PARTY",
        Bytes32 = 9 => "BYTES32",
        Document = 10 => "DOCUMENT",
        LargeText = 11 => "LARGE_TEXT",
        PositiveNumber = 12 => "POSITIVE_NUMBER",
    }
}

define_coded_enum! {
    /// The storage-level type a parameter type is mapped to.
    DataType {
        Bool = 1 => "BOOL",
        String = 2 => "STRING",
        Uint256 = 8 => "UINT256",
        Int256 = 18 => "INT256",
        Address = 40 => "ADDRESS",
        Bytes32 = 59 => "BYTES32",
    }
}
