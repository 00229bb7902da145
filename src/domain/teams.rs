//! Fixed domains offered by the form: IPL franchises and host cities.

pub const TEAMS: [&str; 8] = [
    "Royal Challengers Bangalore",
    "Kolkata Knight Riders",
    "Rajasthan Royals",
    "Mumbai Indians",
    "Chennai Super Kings",
    "Kings XI Punjab",
    "Delhi Capitals",
    "Sunrisers Hyderabad",
];

pub const VENUES: [&str; 26] = [
    "Hyderabad",
    "Mohali",
    "Chandigarh",
    "Bangalore",
    "Chennai",
    "Jaipur",
    "Mumbai",
    "Port Elizabeth",
    "Ahmedabad",
    "Durban",
    "Pune",
    "Sharjah",
    "Kolkata",
    "Cape Town",
    "Bengaluru",
    "Delhi",
    "Abu Dhabi",
    "Ranchi",
    "Centurion",
    "Cuttack",
    "East London",
    "Kimberley",
    "Indore",
    "Visakhapatnam",
    "Dharamsala",
    "Johannesburg",
];

/// Canonical spelling of a known team, matched case-insensitively.
pub fn canonical_team(name: &str) -> Option<&'static str> {
    lookup(&TEAMS, name)
}

/// Canonical spelling of a known venue, matched case-insensitively.
pub fn canonical_venue(name: &str) -> Option<&'static str> {
    lookup(&VENUES, name)
}

fn lookup(domain: &[&'static str], name: &str) -> Option<&'static str> {
    let name = name.trim();
    domain.iter().copied().find(|k| k.eq_ignore_ascii_case(name))
}
