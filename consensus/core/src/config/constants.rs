pub mod protocol {
    //!
    //! A module for constants which directly impact the derived token ledger.
    //!

    //
    // ~~~~~~~~~~~~~~~~~~~~~~~~~ Commit & reveal ~~~~~~~~~~~~~~~~~~~~~~~~~
    //

    /// Maximum height difference between the commit and reveal transactions of any mint
    pub const MINT_GENERAL_COMMIT_REVEAL_DELAY_BLOCKS: u64 = 100;

    /// Maximum height difference between the commit and reveal transactions of a realm,
    /// subrealm, container or ticker claim. Bounds the window in which a name can be front-run.
    pub const MINT_NAME_COMMIT_REVEAL_DELAY_BLOCKS: u64 = 3;

    //
    // ~~~~~~~~~~~~~~~~~~~~~~~~~ Subrealms ~~~~~~~~~~~~~~~~~~~~~~~~~
    //

    /// Blocks after the commit of a winning subrealm claim during which the parent realm can be paid
    pub const MINT_SUBREALM_COMMIT_PAYMENT_DELAY_BLOCKS: u64 = 15;

    /// A rule update only applies this many blocks after the height it was recorded at
    pub const MINT_SUBREALM_RULES_BECOME_EFFECTIVE_IN_BLOCKS: u64 = 3;

    /// The mod path holding the subrealm mint rules of a parent realm
    pub const SUBREALM_MINT_PATH: &str = "/subrealms";

    /// Smallest payment a subrealm rule may ask for
    pub const SUBREALM_MINT_MIN_PAYMENT_DUST_LIMIT: u64 = 0;

    /// Maximum serialized size of a subrealm rule list
    pub const MAX_SUBREALM_RULE_SIZE_BYTES: usize = 1_000_000;

    //
    // ~~~~~~~~~~~~~~~~~~~~~~~~~ Decentralized FT ~~~~~~~~~~~~~~~~~~~~~~~~~
    //

    pub const DFT_MINT_AMOUNT_MIN: u64 = 546;
    pub const DFT_MINT_AMOUNT_MAX: u64 = 100_000_000;

    pub const DFT_MINT_MAX_MIN_COUNT: u64 = 1;
    pub const DFT_MINT_MAX_MAX_COUNT: u64 = 100_000;

    pub const DFT_MINT_HEIGHT_MIN: u64 = 0;
    /// Guards against a unix time being passed as a height
    pub const DFT_MINT_HEIGHT_MAX: u64 = 10_000_000;

    //
    // ~~~~~~~~~~~~~~~~~~~~~~~~~ Identifiers & names ~~~~~~~~~~~~~~~~~~~~~~~~~
    //

    /// Largest output index accepted in the compact text form of an atomical id
    pub const COMPACT_ID_MAX_OUTPUT_INDEX: u32 = 100_000;

    /// Minimum commit bitwork prefix length of a realm, container or ticker claim
    pub const NAME_BITWORKC_MIN_PREFIX_LEN: usize = 4;
}

pub mod index {
    //!
    //! Layout of the spent-atomical records handed over by the index.
    //!

    pub const SPENT_RECORD_HASHX_LEN: usize = atomicals_hashes::HASHX_LEN;
    pub const SPENT_RECORD_SCRIPTHASH_LEN: usize = atomicals_hashes::HASH_SIZE;

    /// Byte offset of the little-endian u64 value inside a spent-atomical record
    pub const SPENT_RECORD_VALUE_OFFSET: usize = SPENT_RECORD_HASHX_LEN + SPENT_RECORD_SCRIPTHASH_LEN;
}
