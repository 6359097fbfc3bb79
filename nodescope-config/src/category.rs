//! Closed sets of telemetry categories.
//!
//! Every trackable domain is a fieldless enum with a stable numeric tag
//! (starting at 1). Documents address members by name; the name lookup is
//! ASCII case-insensitive and a numeric tag is accepted in place of a name.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A closed enumeration of telemetry categories.
pub trait Category: Copy + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Name of the enumeration, used in diagnostics.
    const DOMAIN: &'static str;

    /// Every member, in tag order.
    const ALL: &'static [Self];

    /// Member names, in the same order as [`Category::ALL`].
    const NAMES: &'static [&'static str];

    /// Stable numeric tag of this member.
    fn tag(self) -> u8;

    /// Canonical member name as it appears in documents.
    fn name(self) -> &'static str;

    fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.tag() == tag)
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.name().eq_ignore_ascii_case(name))
    }

    /// Resolves a document token: a member name or its numeric tag.
    fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::from_name(token).or_else(|| token.parse::<u8>().ok().and_then(Self::from_tag))
    }
}

/// Error returned by `FromStr` on category enums.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{token}` is not a member of {domain}")]
pub struct UnknownMember {
    pub domain: &'static str,
    pub token: String,
}

pub(crate) fn serialize_member<C: Category, S: Serializer>(
    member: C,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(member.name())
}

pub(crate) fn deserialize_member<'de, C: Category, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<C, D::Error> {
    deserializer.deserialize_any(CategoryVisitor::<C>(PhantomData))
}

struct CategoryVisitor<C>(PhantomData<C>);

impl<C: Category> CategoryVisitor<C> {
    fn tagged<E: de::Error>(tag: u64) -> Result<C, E> {
        u8::try_from(tag)
            .ok()
            .and_then(C::from_tag)
            .ok_or_else(|| E::unknown_variant(&tag.to_string(), C::NAMES))
    }
}

impl<'de, C: Category> Visitor<'de> for CategoryVisitor<C> {
    type Value = C;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a {} name or tag", C::DOMAIN)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<C, E> {
        C::parse(v).ok_or_else(|| E::unknown_variant(v, C::NAMES))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<C, E> {
        Self::tagged(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<C, E> {
        match u64::try_from(v) {
            Ok(tag) => Self::tagged(tag),
            Err(_) => Err(E::unknown_variant(&v.to_string(), C::NAMES)),
        }
    }
}

macro_rules! categories {
    ($(
        $(#[$meta:meta])*
        $name:ident { $($variant:ident = $tag:literal),+ $(,)? }
    )+) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum $name {
            $($variant = $tag),+
        }

        impl Category for $name {
            const DOMAIN: &'static str = stringify!($name);
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const NAMES: &'static [&'static str] = &[$(stringify!($variant)),+];

            fn tag(self) -> u8 {
                self as u8
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownMember;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as Category>::parse(s).ok_or_else(|| UnknownMember {
                    domain: Self::DOMAIN,
                    token: s.to_string(),
                })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serialize_member(*self, serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserialize_member(deserializer)
            }
        }
    )+};
}

categories! {
    /// Subsystems whose current status is published.
    StatusTracker {
        Index = 1,
        Node = 2,
        Scavenge = 3,
    }

    /// Log positions tracked as checkpoints.
    Checkpoint {
        Chaser = 1,
        Epoch = 2,
        Index = 3,
        Proposal = 4,
        Replication = 5,
        StreamExistenceFilter = 6,
        Truncate = 7,
        Writer = 8,
    }

    /// Outcomes counted for incoming gRPC calls.
    IncomingGrpcCall {
        Current = 1,
        Total = 2,
        Failed = 3,
        Unimplemented = 4,
        DeadlineExceeded = 5,
    }

    /// gRPC methods that can be given a duration label.
    GrpcMethod {
        StreamRead = 1,
        StreamAppend = 2,
        StreamBatchAppend = 3,
        StreamDelete = 4,
        StreamTombstone = 5,
    }

    /// Gossip operations timed between cluster members and clients.
    Gossip {
        PullFromPeer = 1,
        PushToPeer = 2,
        ProcessingPushFromPeer = 3,
        ProcessingRequestFromPeer = 4,
        ProcessingRequestFromGrpcClient = 5,
        ProcessingRequestFromHttpClient = 6,
    }

    /// Storage writer flush metrics.
    WriterTracker {
        FlushSize = 1,
        FlushDuration = 2,
    }

    /// Event read and write counters.
    EventTracker {
        Read = 1,
        Written = 2,
    }

    /// Caches reporting hits and misses.
    Cache {
        StreamInfo = 1,
        Chunk = 2,
    }

    /// HTTP connection metrics of the web host.
    KestrelTracker {
        ConnectionCount = 1,
    }

    /// Host-level measurements.
    SystemTracker {
        Cpu = 1,
        LoadAverage1m = 2,
        LoadAverage5m = 3,
        LoadAverage15m = 4,
        FreeMem = 5,
        TotalMem = 6,
        DriveTotalBytes = 7,
        DriveUsedBytes = 8,
    }

    /// Process and runtime measurements.
    ProcessTracker {
        UpTime = 1,
        Cpu = 2,
        MemWorkingSet = 3,
        ThreadCount = 4,
        LockContentionCount = 5,
        ExceptionCount = 6,
        Gen0CollectionCount = 7,
        Gen1CollectionCount = 8,
        Gen2CollectionCount = 9,
        Gen0Size = 10,
        Gen1Size = 11,
        Gen2Size = 12,
        LohSize = 13,
        TimeInGc = 14,
        HeapSize = 15,
        HeapFragmentation = 16,
        TotalAllocatedBytes = 17,
        DiskReadBytes = 18,
        DiskReadOps = 19,
        DiskWrittenBytes = 20,
        DiskWrittenOps = 21,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn assert_well_formed<C: Category>() {
        assert_eq!(C::ALL.len(), C::NAMES.len());
        let tags: HashSet<u8> = C::ALL.iter().map(|c| c.tag()).collect();
        assert_eq!(tags.len(), C::ALL.len(), "{} has duplicate tags", C::DOMAIN);
        assert!(C::ALL.iter().all(|c| c.tag() >= 1));
        for (member, name) in C::ALL.iter().zip(C::NAMES) {
            assert_eq!(member.name(), *name);
            assert_eq!(C::from_tag(member.tag()), Some(*member));
        }
    }

    #[test]
    fn every_domain_is_well_formed() {
        assert_well_formed::<StatusTracker>();
        assert_well_formed::<Checkpoint>();
        assert_well_formed::<IncomingGrpcCall>();
        assert_well_formed::<GrpcMethod>();
        assert_well_formed::<Gossip>();
        assert_well_formed::<WriterTracker>();
        assert_well_formed::<EventTracker>();
        assert_well_formed::<Cache>();
        assert_well_formed::<KestrelTracker>();
        assert_well_formed::<SystemTracker>();
        assert_well_formed::<ProcessTracker>();
    }

    #[test]
    fn tags_follow_declaration_order() {
        assert_eq!(Checkpoint::Chaser.tag(), 1);
        assert_eq!(Checkpoint::Writer.tag(), 8);
        assert_eq!(ProcessTracker::DiskWrittenOps.tag(), 21);
        assert_eq!(SystemTracker::LoadAverage15m.tag(), 4);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("scavenge".parse(), Ok(StatusTracker::Scavenge));
        assert_eq!("LOADAVERAGE1M".parse(), Ok(SystemTracker::LoadAverage1m));
        assert_eq!(" Chunk ".parse(), Ok(Cache::Chunk));
    }

    #[test]
    fn numeric_tags_parse() {
        assert_eq!("2".parse(), Ok(GrpcMethod::StreamAppend));
        assert_eq!(Gossip::parse("6"), Some(Gossip::ProcessingRequestFromHttpClient));
        assert_eq!(Gossip::parse("7"), None);
        assert_eq!(Gossip::parse("0"), None);
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = "NotARealTracker".parse::<StatusTracker>().unwrap_err();
        assert_eq!(err.domain, "StatusTracker");
        assert_eq!(err.token, "NotARealTracker");
        assert!(err.to_string().contains("StatusTracker"));
    }

    #[test]
    fn display_matches_document_name() {
        assert_eq!(ProcessTracker::TimeInGc.to_string(), "TimeInGc");
        assert_eq!(Checkpoint::StreamExistenceFilter.to_string(), "StreamExistenceFilter");
    }
}
