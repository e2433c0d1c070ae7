/*!
Implementations of the [`value`][crate::value] traits for various primitive and
standard library types
 */

use std::collections::{LinkedList, VecDeque};

use crate::descriptor::{MemberType, TypeTag};
use crate::errors::ConversionError;
use crate::value::{Member, Value, assign_scalar};

/**
Register types that implement [`FromStr`][core::str::FromStr] as scalar
[`Value`][crate::value::Value] members. The type tag defaults to the type's
name; give one explicitly with `=>`.

```
use std::str::FromStr;

#[derive(Debug, Default, PartialEq)]
struct Percent(u8);

impl FromStr for Percent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        let number = s.strip_suffix('%').ok_or("missing %")?;
        number.parse().map(Percent).map_err(|err| format!("{err}"))
    }
}

switchyard::parsed_value! { Percent }

let error = <Percent as switchyard::value::Value>::from_arg("12").unwrap_err();
assert_eq!(error.message, "missing %");
```
*/
#[macro_export]
macro_rules! parsed_value {
    (@tag $type:ty) => {
        $crate::descriptor::TypeTag::Other {
            name: ::core::stringify!($type),
        }
    };

    (@tag $type:ty, $tag:expr) => {
        $tag
    };

    ($($type:ty $(=> $tag:expr)?),+ $(,)?) => {
        $(
            impl $crate::value::Value for $type {
                const TYPE: $crate::descriptor::TypeTag =
                    $crate::parsed_value!(@tag $type $(, $tag)?);

                #[inline]
                fn from_arg(
                    raw: &str,
                ) -> ::core::result::Result<Self, $crate::errors::ConversionError> {
                    raw.parse().map_err(|err| {
                        $crate::errors::ConversionError::parse_error(
                            raw,
                            <Self as $crate::value::Value>::TYPE,
                            err,
                        )
                    })
                }
            }

            impl $crate::value::Member for $type {
                const TYPE: $crate::descriptor::MemberType = $crate::descriptor::MemberType::Scalar(
                    <Self as $crate::value::Value>::TYPE,
                );

                #[inline]
                fn assign(
                    &mut self,
                    raw: &str,
                ) -> ::core::result::Result<(), $crate::errors::ConversionError> {
                    $crate::value::assign_scalar(self, raw)
                }
            }
        )+
    };
}

parsed_value! {
    u8 => TypeTag::Integer,
    u16 => TypeTag::Integer,
    u32 => TypeTag::Integer,
    u64 => TypeTag::Integer,
    u128 => TypeTag::Integer,
    usize => TypeTag::Integer,
    i8 => TypeTag::Integer,
    i16 => TypeTag::Integer,
    i32 => TypeTag::Integer,
    i64 => TypeTag::Integer,
    i128 => TypeTag::Integer,
    isize => TypeTag::Integer,

    f32 => TypeTag::Float,
    f64 => TypeTag::Float,

    char => TypeTag::Char,

    std::path::PathBuf => TypeTag::Other { name: "path" },
    std::net::Ipv4Addr => TypeTag::Other { name: "ipv4 address" },
    std::net::Ipv6Addr => TypeTag::Other { name: "ipv6 address" },
    std::net::IpAddr => TypeTag::Other { name: "ip address" },
    std::net::SocketAddrV4 => TypeTag::Other { name: "ipv4 socket address" },
    std::net::SocketAddrV6 => TypeTag::Other { name: "ipv6 socket address" },
    std::net::SocketAddr => TypeTag::Other { name: "socket address" },
}

impl Value for String {
    const TYPE: TypeTag = TypeTag::String;

    #[inline]
    fn from_arg(raw: &str) -> Result<Self, ConversionError> {
        Ok(raw.to_owned())
    }
}

impl Member for String {
    const TYPE: MemberType = MemberType::Scalar(TypeTag::String);

    #[inline]
    fn assign(&mut self, raw: &str) -> Result<(), ConversionError> {
        assign_scalar(self, raw)
    }
}

impl Value for bool {
    const TYPE: TypeTag = TypeTag::Bool;

    fn from_arg(raw: &str) -> Result<Self, ConversionError> {
        let trimmed = raw.trim();

        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConversionError::should_be(raw, <Self as Value>::TYPE, &["true", "false"]))
        }
    }
}

impl Member for bool {
    const TYPE: MemberType = MemberType::Scalar(TypeTag::Bool);

    #[inline]
    fn assign(&mut self, raw: &str) -> Result<(), ConversionError> {
        assign_scalar(self, raw)
    }
}

// Only ordered sequences are list members; sets would lose the order the
// values were given in.
macro_rules! lists {
    ($($type:ident .$insert:ident),+ $(,)?) => {
        $(
            impl<T: Value> Member for $type<T> {
                const TYPE: MemberType = MemberType::List(T::TYPE);

                #[inline]
                fn assign(&mut self, raw: &str) -> Result<(), ConversionError> {
                    T::from_arg(raw).map(|value| self.$insert(value))
                }
            }

            impl<T: Value> Member for Option<$type<T>> {
                const TYPE: MemberType = MemberType::List(T::TYPE);

                #[inline]
                fn assign(&mut self, raw: &str) -> Result<(), ConversionError> {
                    let value = T::from_arg(raw)?;
                    self.get_or_insert_with($type::new).$insert(value);
                    Ok(())
                }
            }
        )+
    };
}

lists! {
    Vec.push,
    VecDeque.push_back,
    LinkedList.push_back,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(i32::from_arg("104"), Ok(104));
        assert_eq!(<u8 as Value>::TYPE, TypeTag::Integer);

        let error = i32::from_arg("aaa").unwrap_err();
        assert_eq!(error.value, "aaa");
        assert_eq!(error.expected, TypeTag::Integer);
        assert!(!error.message.is_empty());
    }

    #[test]
    fn strings_are_unchanged() {
        assert_eq!(String::from_arg(" as is "), Ok(" as is ".to_owned()));
    }

    #[test]
    fn bools() {
        assert_eq!(bool::from_arg("true"), Ok(true));
        assert_eq!(bool::from_arg("False"), Ok(false));
        assert_eq!(bool::from_arg("TRUE"), Ok(true));

        let error = bool::from_arg("yes").unwrap_err();
        assert_eq!(error.expected, TypeTag::Bool);
    }

    #[test]
    fn scalars_replace() {
        let mut value = 1_i64;
        value.assign("2").unwrap();
        value.assign("3").unwrap();
        assert_eq!(value, 3);

        assert!(value.assign("x").is_err());
        assert_eq!(value, 3);
    }

    #[test]
    fn lists_append() {
        let mut list: Vec<u16> = Vec::new();
        list.assign("1").unwrap();
        list.assign("2").unwrap();
        assert_eq!(list, [1, 2]);
        assert_eq!(<Vec<u16> as Member>::TYPE, MemberType::List(TypeTag::Integer));

        let mut queue: VecDeque<char> = VecDeque::new();
        queue.assign("a").unwrap();
        queue.assign("b").unwrap();
        assert_eq!(queue, ['a', 'b']);
    }

    #[test]
    fn absent_lists_are_created_on_first_append() {
        let mut list: Option<Vec<i32>> = None;
        assert!(list.assign("nope").is_err());
        assert_eq!(list, None);

        list.assign("1").unwrap();
        assert_eq!(list, Some(vec![1]));
        list.assign("2").unwrap();
        assert_eq!(list, Some(vec![1, 2]));
    }

    #[test]
    fn paths_and_addresses() {
        use std::net::Ipv4Addr;
        use std::path::PathBuf;

        assert_eq!(
            PathBuf::from_arg(r"c:\temp\file.txt"),
            Ok(PathBuf::from(r"c:\temp\file.txt"))
        );
        assert_eq!(
            Ipv4Addr::from_arg("127.0.0.1"),
            Ok(Ipv4Addr::new(127, 0, 0, 1))
        );
        assert!(Ipv4Addr::from_arg("localhost").is_err());
    }
}
