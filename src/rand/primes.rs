/// Largest primes below 2^k, used as state multipliers.
pub const PRIMES: [usize; 8] = [
    4_294_967_291,              // 2^32 - 5
    1_099_511_627_689,          // 2^40 - 87
    281_474_976_710_597,        // 2^48 - 59
    72_057_594_037_927_931,     // 2^56 - 5
    2_305_843_009_213_693_951,  // 2^61 - 1
    4_611_686_018_427_387_847,  // 2^62 - 57
    9_223_372_036_854_775_783,  // 2^63 - 25
    18_446_744_073_709_551_557, // 2^64 - 59
];
