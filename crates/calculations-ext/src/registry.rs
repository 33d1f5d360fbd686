//! SQL function name to Python delegate mapping.

/// How a delegate's return value is written back to SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// `str()` of the return value, as SQL text.
    Text,
    /// Truth value of the return value, as SQL integer 0 or 1.
    Boolean,
}

/// One registered SQL function and the Python delegate behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delegate {
    PreNileTokensPerDay,
    AmazonStakerTokenRewards,
    NileStakerTokenRewards,
    StakerTokenRewards,
    AmazonOperatorTokenRewards,
    NileOperatorTokenRewards,
    BigGt,
}

impl Delegate {
    /// Every registered function, in registration order.
    pub const ALL: [Delegate; 7] = [
        Delegate::PreNileTokensPerDay,
        Delegate::AmazonStakerTokenRewards,
        Delegate::NileStakerTokenRewards,
        Delegate::StakerTokenRewards,
        Delegate::AmazonOperatorTokenRewards,
        Delegate::NileOperatorTokenRewards,
        Delegate::BigGt,
    ];

    /// Name the function is registered under in SQL.
    pub fn sql_name(self) -> &'static str {
        match self {
            Delegate::PreNileTokensPerDay => "pre_nile_tokens_per_day",
            Delegate::AmazonStakerTokenRewards => "amazon_staker_token_rewards",
            Delegate::NileStakerTokenRewards => "nile_staker_token_rewards",
            Delegate::StakerTokenRewards => "staker_token_rewards",
            Delegate::AmazonOperatorTokenRewards => "amazon_operator_token_rewards",
            Delegate::NileOperatorTokenRewards => "nile_operator_token_rewards",
            Delegate::BigGt => "big_gt",
        }
    }

    /// Attribute looked up in the Python module.
    pub fn delegate_name(self) -> &'static str {
        match self {
            Delegate::PreNileTokensPerDay => "preNileTokensPerDay",
            Delegate::AmazonStakerTokenRewards => "amazonStakerTokenRewards",
            Delegate::NileStakerTokenRewards => "nileStakerTokenRewards",
            Delegate::StakerTokenRewards => "stakerTokenRewards",
            Delegate::AmazonOperatorTokenRewards => "amazonOperatorTokenRewards",
            Delegate::NileOperatorTokenRewards => "nileOperatorTokenRewards",
            Delegate::BigGt => "bigGt",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Delegate::PreNileTokensPerDay
            | Delegate::AmazonOperatorTokenRewards
            | Delegate::NileOperatorTokenRewards => 1,
            Delegate::AmazonStakerTokenRewards
            | Delegate::NileStakerTokenRewards
            | Delegate::StakerTokenRewards
            | Delegate::BigGt => 2,
        }
    }

    pub fn result_kind(self) -> ResultKind {
        match self {
            Delegate::BigGt => ResultKind::Boolean,
            _ => ResultKind::Text,
        }
    }

    #[cfg(test)]
    fn from_sql_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.sql_name().eq_ignore_ascii_case(name))
    }
}
