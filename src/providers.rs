//! Electric utility directory
//! Maps state codes to the utilities that serve them

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::ElectricProvider;
use crate::zip_states::state_for_zip;

const fn provider(
    id: &'static str,
    name: &'static str,
    state: &'static str,
    city: &'static str,
    zip_code: &'static str,
    service_area: &'static [&'static str],
) -> ElectricProvider {
    ElectricProvider { id, name, state, city, zip_code, service_area }
}

/// Every known utility, grouped by state in display order
pub static ELECTRIC_PROVIDERS: &[ElectricProvider] = &[
    // CA
    provider("pge", "Pacific Gas & Electric (PG&E)", "CA", "San Francisco", "94102", &["San Francisco", "Oakland", "San Jose", "Fresno", "Sacramento"]),
    provider("sce", "Southern California Edison", "CA", "Rosemead", "91770", &["Los Angeles", "Riverside", "San Bernardino", "Orange County"]),
    provider("sdge", "San Diego Gas & Electric", "CA", "San Diego", "92101", &["San Diego", "Chula Vista", "Oceanside"]),
    provider("ladp", "Los Angeles Department of Water and Power", "CA", "Los Angeles", "90012", &["Los Angeles", "Glendale", "Burbank"]),
    // TX
    provider("oncor", "Oncor Electric Delivery", "TX", "Dallas", "75201", &["Dallas", "Fort Worth", "Arlington", "Plano", "Irving"]),
    provider("centerpoint", "CenterPoint Energy", "TX", "Houston", "77002", &["Houston", "Sugar Land", "The Woodlands", "Baytown"]),
    provider("aep", "AEP Texas", "TX", "Corpus Christi", "78401", &["Corpus Christi", "McAllen", "Laredo", "Victoria"]),
    provider("tnmp", "Texas-New Mexico Power", "TX", "Lewisville", "75067", &["Lewisville", "Denton", "Galveston", "Fort Stockton"]),
    // FL
    provider("fpl", "Florida Power & Light", "FL", "Juno Beach", "33408", &["Miami", "Fort Lauderdale", "West Palm Beach", "Orlando", "Tampa"]),
    provider("duke-fl", "Duke Energy Florida", "FL", "St. Petersburg", "33701", &["St. Petersburg", "Clearwater", "Ocala", "Gainesville"]),
    provider("teco", "Tampa Electric", "FL", "Tampa", "33602", &["Tampa", "Plant City", "Zephyrhills"]),
    provider("ouc", "Orlando Utilities Commission", "FL", "Orlando", "32801", &["Orlando", "Winter Park", "Kissimmee"]),
    // NY
    provider("coned", "Consolidated Edison", "NY", "New York", "10003", &["New York City", "Westchester"]),
    provider("nyseg", "New York State Electric & Gas", "NY", "Binghamton", "13902", &["Binghamton", "Syracuse", "Rochester", "Buffalo"]),
    provider("lipa", "PSEG Long Island", "NY", "Uniondale", "11553", &["Long Island", "Nassau", "Suffolk"]),
    provider("central-hudson", "Central Hudson Gas & Electric", "NY", "Poughkeepsie", "12601", &["Poughkeepsie", "Newburgh", "Kingston"]),
    // PA
    provider("peco", "PECO Energy", "PA", "Philadelphia", "19101", &["Philadelphia", "Chester", "Montgomery", "Delaware"]),
    provider("duke-pa", "Duquesne Light", "PA", "Pittsburgh", "15219", &["Pittsburgh", "Allegheny County"]),
    provider("ppl", "PPL Electric Utilities", "PA", "Allentown", "18101", &["Allentown", "Harrisburg", "Lancaster", "Scranton"]),
    provider("meted", "Met-Ed", "PA", "Reading", "19601", &["Reading", "York", "Lebanon"]),
    // IL
    provider("comed", "ComEd", "IL", "Chicago", "60601", &["Chicago", "Rockford", "Aurora", "Naperville", "Joliet"]),
    provider("ameren", "Ameren Illinois", "IL", "Springfield", "62701", &["Springfield", "Peoria", "Decatur", "Champaign"]),
    // OH
    provider("aep-oh", "AEP Ohio", "OH", "Columbus", "43215", &["Columbus", "Athens", "Zanesville"]),
    provider("duke-oh", "Duke Energy Ohio", "OH", "Cincinnati", "45202", &["Cincinnati", "Hamilton", "Middletown"]),
    provider("firstenergy", "FirstEnergy", "OH", "Akron", "44308", &["Akron", "Cleveland", "Toledo", "Youngstown"]),
    provider("dayton", "Dayton Power & Light", "OH", "Dayton", "45402", &["Dayton", "Springfield", "Kettering"]),
    // GA
    provider("georgia-power", "Georgia Power", "GA", "Atlanta", "30303", &["Atlanta", "Augusta", "Savannah", "Columbus", "Macon"]),
    provider("meag", "MEAG Power", "GA", "Atlanta", "30309", &["Metro Atlanta"]),
    // NC
    provider("duke-nc", "Duke Energy Carolinas", "NC", "Charlotte", "28202", &["Charlotte", "Raleigh", "Durham", "Greensboro", "Winston-Salem"]),
    provider("dominion", "Dominion Energy North Carolina", "NC", "Raleigh", "27601", &["Raleigh", "Cary", "Wilmington"]),
    // NJ
    provider("pseg", "PSE&G", "NJ", "Newark", "07102", &["Newark", "Jersey City", "Paterson", "Elizabeth"]),
    provider("jersey-central", "Jersey Central Power & Light", "NJ", "Morristown", "07960", &["Morristown", "Trenton", "Princeton"]),
    provider("atlantic-city", "Atlantic City Electric", "NJ", "Pleasantville", "08232", &["Atlantic City", "Ocean City", "Vineland"]),
    provider("rockland", "Orange & Rockland Utilities", "NJ", "Ramsey", "07446", &["Ramsey", "Paramus", "Hackensack"]),
    // MA
    provider("eversource", "Eversource Energy", "MA", "Boston", "02101", &["Boston", "Cambridge", "Lowell", "Worcester", "Springfield"]),
    provider("national-grid", "National Grid", "MA", "Waltham", "02451", &["Waltham", "Brookline", "Newton", "Quincy"]),
    provider("unitil", "Unitil", "MA", "Fitchburg", "01420", &["Fitchburg", "Leominster", "Gardner"]),
    // AZ
    provider("aps", "Arizona Public Service", "AZ", "Phoenix", "85004", &["Phoenix", "Mesa", "Tempe", "Scottsdale", "Glendale"]),
    provider("srp", "Salt River Project", "AZ", "Tempe", "85281", &["Tempe", "Mesa", "Chandler", "Gilbert"]),
    provider("tuscon", "Tucson Electric Power", "AZ", "Tucson", "85701", &["Tucson", "Oro Valley", "Marana"]),
    // NV
    provider("nve", "NV Energy", "NV", "Las Vegas", "89101", &["Las Vegas", "Henderson", "Reno", "North Las Vegas"]),
    // CO
    provider("xcel-co", "Xcel Energy Colorado", "CO", "Denver", "80202", &["Denver", "Colorado Springs", "Aurora", "Boulder", "Fort Collins"]),
    // WA
    provider("pse-wa", "Puget Sound Energy", "WA", "Bellevue", "98009", &["Bellevue", "Seattle", "Tacoma", "Olympia"]),
    provider("seattle-city", "Seattle City Light", "WA", "Seattle", "98104", &["Seattle"]),
    provider("snohomish", "Snohomish County PUD", "WA", "Everett", "98201", &["Everett", "Lynnwood", "Marysville"]),
    // OR
    provider("pacificorp", "Pacific Power", "OR", "Portland", "97204", &["Portland", "Salem", "Eugene", "Bend"]),
    provider("pge-or", "Portland General Electric", "OR", "Portland", "97232", &["Portland", "Beaverton", "Lake Oswego"]),
    // MI
    provider("consumers", "Consumers Energy", "MI", "Jackson", "49201", &["Jackson", "Lansing", "Grand Rapids", "Flint", "Saginaw"]),
    provider("dte", "DTE Energy", "MI", "Detroit", "48226", &["Detroit", "Ann Arbor", "Warren", "Sterling Heights"]),
    // IN
    provider("duke-in", "Duke Energy Indiana", "IN", "Indianapolis", "46204", &["Indianapolis", "Bloomington", "Lafayette"]),
    provider("aep-in", "AEP Indiana Michigan Power", "IN", "Fort Wayne", "46802", &["Fort Wayne", "South Bend", "Elkhart"]),
    provider("nipsco", "NIPSCO", "IN", "Merrillville", "46410", &["Merrillville", "Gary", "Hammond"]),
    // WI
    provider("we-energies", "We Energies", "WI", "Milwaukee", "53203", &["Milwaukee", "Madison", "Green Bay", "Kenosha"]),
    provider("wisconsin-pub", "Wisconsin Public Service", "WI", "Green Bay", "54301", &["Green Bay", "Appleton", "Oshkosh"]),
    // MN
    provider("xcel-mn", "Xcel Energy Minnesota", "MN", "Minneapolis", "55401", &["Minneapolis", "St. Paul", "Rochester", "Duluth"]),
    provider("otter-tail", "Otter Tail Power", "MN", "Fergus Falls", "56537", &["Fergus Falls", "Detroit Lakes", "Alexandria"]),
    // MO
    provider("ameren-mo", "Ameren Missouri", "MO", "St. Louis", "63101", &["St. Louis", "Kansas City", "Springfield", "Columbia"]),
    provider("kcp", "Kansas City Power & Light", "MO", "Kansas City", "64105", &["Kansas City", "Independence", "Lee's Summit"]),
    // MD
    provider("bge", "Baltimore Gas & Electric", "MD", "Baltimore", "21201", &["Baltimore", "Annapolis", "Columbia"]),
    provider("pepco", "Pepco", "MD", "Washington", "20001", &["Washington DC", "Montgomery County", "Prince George's County"]),
    provider("potomac-edison", "Potomac Edison", "MD", "Williamsport", "21795", &["Williamsport", "Hagerstown", "Frederick"]),
    // VA
    provider("dominion-va", "Dominion Energy Virginia", "VA", "Richmond", "23219", &["Richmond", "Virginia Beach", "Norfolk", "Arlington", "Alexandria"]),
    provider("appalachian", "Appalachian Power", "VA", "Roanoke", "24011", &["Roanoke", "Lynchburg", "Blacksburg"]),
    // SC
    provider("duke-sc", "Duke Energy South Carolina", "SC", "Greenville", "29601", &["Greenville", "Columbia", "Charleston", "Spartanburg"]),
    provider("santee", "Santee Cooper", "SC", "Moncks Corner", "29461", &["Moncks Corner", "Myrtle Beach", "Georgetown"]),
    // TN
    provider("tva", "Tennessee Valley Authority", "TN", "Knoxville", "37902", &["Knoxville", "Nashville", "Memphis", "Chattanooga"]),
    provider("memphis-light", "Memphis Light, Gas & Water", "TN", "Memphis", "38103", &["Memphis"]),
    // AL
    provider("alabama-power", "Alabama Power", "AL", "Birmingham", "35203", &["Birmingham", "Montgomery", "Mobile", "Huntsville"]),
    // LA
    provider("entergy-la", "Entergy Louisiana", "LA", "New Orleans", "70112", &["New Orleans", "Baton Rouge", "Shreveport", "Lafayette"]),
    provider("cleco", "Cleco", "LA", "Pineville", "71360", &["Pineville", "Alexandria", "Monroe"]),
    // OK
    provider("oge", "Oklahoma Gas & Electric", "OK", "Oklahoma City", "73102", &["Oklahoma City", "Tulsa", "Norman", "Lawton"]),
    provider("pso", "Public Service Company of Oklahoma", "OK", "Tulsa", "74103", &["Tulsa", "Muskogee", "Bartlesville"]),
    // KS
    provider("westar", "Evergy (Westar)", "KS", "Topeka", "66603", &["Topeka", "Wichita", "Kansas City", "Lawrence"]),
    // NE
    provider("oppd", "Omaha Public Power District", "NE", "Omaha", "68102", &["Omaha", "Bellevue", "Papillion"]),
    provider("nppd", "Nebraska Public Power District", "NE", "Columbus", "68601", &["Columbus", "Norfolk", "Grand Island"]),
    // IA
    provider("midamerican", "MidAmerican Energy", "IA", "Des Moines", "50309", &["Des Moines", "Cedar Rapids", "Davenport", "Sioux City"]),
    provider("alliant", "Alliant Energy", "IA", "Cedar Rapids", "52401", &["Cedar Rapids", "Waterloo", "Dubuque"]),
    // AR
    provider("entergy-ar", "Entergy Arkansas", "AR", "Little Rock", "72201", &["Little Rock", "Fort Smith", "Fayetteville", "Springdale"]),
    // MS
    provider("entergy-ms", "Entergy Mississippi", "MS", "Jackson", "39201", &["Jackson", "Gulfport", "Biloxi", "Hattiesburg"]),
    // KY
    provider("lge", "Louisville Gas & Electric", "KY", "Louisville", "40202", &["Louisville", "Lexington", "Bowling Green"]),
    provider("kenergy", "Kenergy", "KY", "Owensboro", "42301", &["Owensboro", "Henderson", "Madisonville"]),
    // WV
    provider("appalachian-wv", "Appalachian Power West Virginia", "WV", "Charleston", "25301", &["Charleston", "Huntington", "Morgantown"]),
    provider("mon-power", "Mon Power", "WV", "Fairmont", "26554", &["Fairmont", "Clarksburg", "Morgantown"]),
    // CT
    provider("eversource-ct", "Eversource Connecticut", "CT", "Hartford", "06103", &["Hartford", "New Haven", "Bridgeport", "Stamford"]),
    provider("ui", "United Illuminating", "CT", "New Haven", "06510", &["New Haven", "Bridgeport", "Milford"]),
    // RI
    provider("national-grid-ri", "National Grid Rhode Island", "RI", "Providence", "02903", &["Providence", "Warwick", "Cranston", "Pawtucket"]),
    // NH
    provider("eversource-nh", "Eversource New Hampshire", "NH", "Manchester", "03101", &["Manchester", "Nashua", "Concord"]),
    provider("unitil-nh", "Unitil New Hampshire", "NH", "Hampton", "03842", &["Hampton", "Portsmouth", "Exeter"]),
    // ME
    provider("cmp", "Central Maine Power", "ME", "Augusta", "04330", &["Augusta", "Portland", "Lewiston", "Bangor"]),
    provider("versant", "Versant Power", "ME", "Bangor", "04401", &["Bangor", "Presque Isle", "Ellsworth"]),
    // VT
    provider("green-mountain", "Green Mountain Power", "VT", "Colchester", "05446", &["Burlington", "Rutland", "Montpelier"]),
    // DE
    provider("delmarva", "Delmarva Power", "DE", "Newark", "19702", &["Wilmington", "Dover", "Newark"]),
    // DC
    provider("pepco-dc", "Pepco DC", "DC", "Washington", "20001", &["Washington DC"]),
    // NM
    provider("pnm", "PNM Resources", "NM", "Albuquerque", "87102", &["Albuquerque", "Santa Fe", "Las Cruces"]),
    provider("el-paso", "El Paso Electric", "NM", "Las Cruces", "88001", &["Las Cruces", "Alamogordo"]),
    // UT
    provider("rocky-mountain", "Rocky Mountain Power", "UT", "Salt Lake City", "84111", &["Salt Lake City", "Provo", "Ogden", "St. George"]),
    // ID
    provider("idaho-power", "Idaho Power", "ID", "Boise", "83702", &["Boise", "Nampa", "Idaho Falls", "Pocatello"]),
    provider("avista", "Avista Utilities", "ID", "Coeur d'Alene", "83814", &["Coeur d'Alene", "Lewiston", "Moscow"]),
    // MT
    provider("northwestern", "NorthWestern Energy", "MT", "Butte", "59701", &["Butte", "Billings", "Missoula", "Great Falls"]),
    // WY
    provider("rocky-mountain-wy", "Rocky Mountain Power Wyoming", "WY", "Cheyenne", "82001", &["Cheyenne", "Casper", "Laramie"]),
    // ND
    provider("otter-tail-nd", "Otter Tail Power ND", "ND", "Fargo", "58102", &["Fargo", "Bismarck", "Grand Forks"]),
    provider("montana-dakota", "Montana-Dakota Utilities", "ND", "Bismarck", "58501", &["Bismarck", "Minot", "Dickinson"]),
    // SD
    provider("northwestern-sd", "NorthWestern Energy SD", "SD", "Sioux Falls", "57104", &["Sioux Falls", "Rapid City", "Aberdeen"]),
    // AK
    provider("chugach", "Chugach Electric", "AK", "Anchorage", "99501", &["Anchorage", "Eagle River"]),
    provider("municipal-light", "Municipal Light & Power", "AK", "Anchorage", "99507", &["Anchorage"]),
    // HI
    provider("hawaiian", "Hawaiian Electric", "HI", "Honolulu", "96808", &["Honolulu", "Maui", "Hawaii Island", "Kauai"]),
];

/// State code to its utilities, in table order
pub static PROVIDERS_BY_STATE: LazyLock<HashMap<&'static str, Vec<ElectricProvider>>> = LazyLock::new(|| {
    let mut m: HashMap<&'static str, Vec<ElectricProvider>> = HashMap::new();
    for p in ELECTRIC_PROVIDERS {
        m.entry(p.state).or_default().push(*p);
    }
    m
});

/// Longer utility lists offered on the provider step for the biggest markets
pub static EXTENDED_PROVIDER_NAMES: LazyLock<HashMap<&'static str, &'static [&'static str]>> = LazyLock::new(|| {
    let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();

    m.insert("CA", &[
        "Pacific Gas & Electric Co",
        "Southern California Edison Co",
        "San Diego Gas & Electric Co",
        "Los Angeles Department of Water & Power",
        "Sacramento Municipal Util Dist",
        "Modesto Irrigation District",
        "Turlock Irrigation District",
        "Imperial Irrigation District",
        "PacifiCorp",
        "Other",
    ]);
    m.insert("TX", &[
        "Oncor Electric Delivery",
        "CenterPoint Energy",
        "AEP Texas",
        "Texas-New Mexico Power",
        "Other",
    ]);
    m.insert("FL", &[
        "Florida Power & Light",
        "Duke Energy Florida",
        "Tampa Electric",
        "Orlando Utilities Commission",
        "Other",
    ]);
    m.insert("NY", &[
        "Consolidated Edison",
        "New York State Electric & Gas",
        "PSEG Long Island",
        "Central Hudson Gas & Electric",
        "Other",
    ]);

    m
});

/// All utilities registered for a state code
pub fn providers_for_state(state_code: &str) -> &'static [ElectricProvider] {
    PROVIDERS_BY_STATE
        .get(state_code)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Utilities for the state implied by a 5-character ZIP code.
/// Empty when the ZIP is malformed or its prefix maps to no state.
pub fn lookup_providers_by_state(zip: &str) -> &'static [ElectricProvider] {
    state_for_zip(zip).map(providers_for_state).unwrap_or(&[])
}

/// Choices for the provider step.
///
/// The state is taken from the first resolved provider (CA when there are
/// none); big markets get the extended list, everyone else gets the
/// directory names plus "Other".
pub fn provider_options(providers: &[ElectricProvider]) -> Vec<String> {
    let state_code = providers.first().map(|p| p.state).unwrap_or("CA");

    match EXTENDED_PROVIDER_NAMES.get(state_code) {
        Some(names) => names.iter().map(|n| n.to_string()).collect(),
        None => providers
            .iter()
            .map(|p| p.name.to_string())
            .chain(std::iter::once("Other".to_string()))
            .collect(),
    }
}
