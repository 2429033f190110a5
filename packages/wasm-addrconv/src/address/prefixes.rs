//! Human readable prefixes of the legacy and the new encoding.

/// Prefix of new transparent addresses.
pub const HRP_ADDRESS_NEW: &str = "tnam";
/// Prefix of new shielded payment addresses (pinned and unpinned).
pub const HRP_PAYMENT_ADDRESS_NEW: &str = "znam";
/// Prefix of new public keys.
pub const HRP_PUBLIC_KEY_NEW: &str = "tpknam";

/// A human readable prefix of the legacy encoding.
///
/// Every legacy prefix maps to exactly one new prefix; the two shielded payment
/// prefixes collapse into one and are told apart by a leading flag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OldPrefix {
    Address,
    PaymentAddressUnpinned,
    PaymentAddressPinned,
    SpendingKey,
    ViewingKey,
    PublicKey,
    ThresholdKey,
    Signature,
}

impl OldPrefix {
    pub const ALL: [OldPrefix; 8] = [
        OldPrefix::Address,
        OldPrefix::PaymentAddressUnpinned,
        OldPrefix::PaymentAddressPinned,
        OldPrefix::SpendingKey,
        OldPrefix::ViewingKey,
        OldPrefix::PublicKey,
        OldPrefix::ThresholdKey,
        OldPrefix::Signature,
    ];

    /// The legacy human readable prefix.
    pub const fn as_str(self) -> &'static str {
        match self {
            OldPrefix::Address => "atest",
            OldPrefix::PaymentAddressUnpinned => "patest",
            OldPrefix::PaymentAddressPinned => "ppatest",
            OldPrefix::SpendingKey => "xsktest",
            OldPrefix::ViewingKey => "xfvktest",
            OldPrefix::PublicKey => "pktest",
            OldPrefix::ThresholdKey => "dpktest",
            OldPrefix::Signature => "sigtest",
        }
    }

    /// The prefix the converted value is encoded under.
    pub const fn new_hrp(self) -> &'static str {
        match self {
            OldPrefix::Address => HRP_ADDRESS_NEW,
            OldPrefix::PaymentAddressUnpinned | OldPrefix::PaymentAddressPinned => {
                HRP_PAYMENT_ADDRESS_NEW
            }
            OldPrefix::SpendingKey => "zsknam",
            OldPrefix::ViewingKey => "zvknam",
            OldPrefix::PublicKey => HRP_PUBLIC_KEY_NEW,
            OldPrefix::ThresholdKey => "dpknam",
            OldPrefix::Signature => "signam",
        }
    }

    /// Look up a legacy prefix. `hrp` must already be lowercase.
    pub fn from_hrp(hrp: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|prefix| prefix.as_str() == hrp)
    }
}
