use super::RepoId;
use crate::path_utils::sanitize_path_component;
use core::fmt::Formatter;
use serde::de::{Error as _, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Include and exclude glob patterns for one slice, both relative to the repository root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SliceSettings {
    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

impl SliceSettings {
    #[must_use]
    pub fn new<I, E>(include: I, exclude: E) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }
}

/// Named slices of a repository, in the order they were written.
///
/// A slice mapped to `None` (`null` in the repository list) is configured but disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slices(Vec<(String, Option<SliceSettings>)>);

impl Slices {
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&SliceSettings>)> {
        self.0.iter().map(|(name, settings)| (name.as_str(), settings.as_ref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Option<SliceSettings>)> for Slices {
    fn from_iter<T: IntoIterator<Item = (S, Option<SliceSettings>)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(name, settings)| (name.into(), settings)).collect())
    }
}

impl<'de> Deserialize<'de> for Slices {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        struct SlicesVisitor;

        impl<'de> Visitor<'de> for SlicesVisitor {
            type Value = Slices;

            fn expecting(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
                f.write_str("a map of slice names to slice settings or null")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> core::result::Result<Slices, A::Error> {
                let mut slices: Vec<(String, Option<SliceSettings>)> = Vec::with_capacity(map.size_hint().unwrap_or(0));

                while let Some((name, settings)) = map.next_entry::<String, Option<SliceSettings>>()? {
                    if name.is_empty() {
                        return Err(A::Error::custom("slice names must not be empty"));
                    }

                    if name == "." || name == ".." {
                        return Err(A::Error::custom(format!("'{name}' is not a valid slice name")));
                    }

                    if slices.iter().any(|(existing, _)| *existing == name) {
                        return Err(A::Error::custom(format!("duplicate slice '{name}'")));
                    }

                    let component = sanitize_path_component(&name);
                    if let Some((existing, _)) = slices.iter().find(|(existing, _)| sanitize_path_component(existing) == component) {
                        return Err(A::Error::custom(format!("slices '{existing}' and '{name}' would share the directory '{component}'")));
                    }

                    slices.push((name, settings));
                }

                Ok(Slices(slices))
            }
        }

        deserializer.deserialize_map(SlicesVisitor)
    }
}

/// One repository of the census: its identifier, free-form tags, and the slices to extract.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepoEntry {
    pub repo: RepoId,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub slices: Slices,
}
