/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in the reference leap year
pub const DAYS_IN_YEAR: u16 = 366;

/// Days in each month of the reference leap year (index 0 unused, months are 1-indexed).
/// February always has 29 days: the reference year exists to index dates, not to model
/// any particular historical year.
pub const MONTH_LENGTHS: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    29, // February (reference year is always a leap year)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Day-ordinal of the first day of each month (index 0 unused).
/// Derived from `MONTH_LENGTHS` so the two tables cannot drift apart.
pub const MONTH_STARTS: [u16; 13] = month_starts();

const fn month_starts() -> [u16; 13] {
    let mut starts = [0u16; 13];
    starts[JANUARY as usize] = 1;

    let mut month = JANUARY as usize + 1;
    while month <= DECEMBER as usize {
        starts[month] = starts[month - 1] + MONTH_LENGTHS[month - 1] as u16;
        month += 1;
    }

    starts
}

/// English month names, indexed by month number minus one.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
