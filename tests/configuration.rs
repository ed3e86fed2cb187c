use std::fs;
use std::process;

use chrono::NaiveDate;

use holidaycalc::configuration::Configuration;
use holidaycalc::manager::manager::IManager;
use holidaycalc::manager::managererror::ManagerError;
use holidaycalc::time::calendar::holidayengine::holidays_for_year;
use holidaycalc::time::holidayerror::HolidayError;
use holidaycalc::time::recurringholiday::recurringholiday::CustomHoliday;
use holidaycalc::time::recurringholiday::recurringholidayloader::CustomHolidayRegistry;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const CATALOGS: &str = r#"{
    "holiday_catalogs": [
        {
            "name": "XX-lite",
            "base": "XX",
            "subdivisions": ["XX", "North"],
            "remove": ["Midsummer"],
            "replace": [
                {"name": "Harvest", "holiday_type": "FixedDate", "month": 10, "day": 1}
            ]
        },
        {
            "name": "XX",
            "subdivisions": ["XX", "North", "South"],
            "default_subdivision": "XX",
            "deprecated_subdivisions": [{"code": "Old North", "message": "use North"}],
            "weekends": ["Fri", "Sat"],
            "rules": [
                {
                    "name": "New Year",
                    "holiday_type": "FixedDate", "month": 1, "day": 1,
                    "observed": {"policy": "WeekendDeltas", "saturday": 1, "sunday": 0}
                },
                {
                    "name": "Harvest",
                    "subdivisions": ["North", "South"],
                    "holiday_type": "NthWeekday", "month": 9, "occurrence": "Last", "weekday": "Thu",
                    "variants": [
                        {
                            "subdivisions": ["South"],
                            "name": "Southern Harvest",
                            "holiday": {"holiday_type": "WeekdayOnOrAfter", "month": 10, "day": 10, "weekday": "Thu"}
                        }
                    ]
                },
                {"name": "Midsummer", "holiday_type": "Custom", "function": "midsummer"},
                {
                    "name": "Founders",
                    "holiday_type": "EasterRelated", "easter_type": "Orthodox", "shift_days": 1,
                    "years": {"from": 2000, "to": 2030}
                }
            ],
            "special_occasions": [{"date": "2023-03-03", "name": "Coronation"}]
        }
    ]
}"#;

fn registry() -> CustomHolidayRegistry {
    let mut registry = CustomHolidayRegistry::new();
    registry.register(CustomHoliday::from_fn("midsummer", |year| NaiveDate::from_ymd_opt(year, 6, 21)));
    registry
}

#[test]
fn loads_catalogs_from_json() {
    let configuration = Configuration::with_custom_holidays(registry());
    configuration.from_json_str(CATALOGS).unwrap();

    let catalog = configuration.catalog("XX").unwrap();
    assert_eq!(catalog.default_subdivision(), "XX");
    assert!(catalog.deprecation("Old North").is_some());

    // 2023-01-01 is a Sunday, which is not a weekend here
    let holidays = holidays_for_year(&catalog, 2023, "XX", true).unwrap();
    assert_eq!(holidays.get(&ymd(2023, 1, 1)), Some("New Year"));
    assert!(!holidays.contains(&ymd(2023, 1, 2)));
    assert_eq!(holidays.get(&ymd(2023, 6, 21)), Some("Midsummer"));
    assert_eq!(holidays.get(&ymd(2023, 3, 3)), Some("Coronation"));
    // Orthodox Easter 2023 is April 16
    assert_eq!(holidays.get(&ymd(2023, 4, 17)), Some("Founders"));
    assert_eq!(holidays.get(&ymd(2023, 9, 28)), Some("Harvest [North]"));
    assert_eq!(holidays.get(&ymd(2023, 10, 12)), Some("Southern Harvest [South]"));

    let holidays = holidays_for_year(&catalog, 2022, "South", true).unwrap();
    // 2022-01-01 is a Saturday
    assert_eq!(holidays.get(&ymd(2022, 1, 2)), Some("New Year (Observed)"));
    assert_eq!(holidays.get(&ymd(2022, 10, 13)), Some("Southern Harvest"));

    let holidays = holidays_for_year(&catalog, 2031, "North", false).unwrap();
    assert_eq!(holidays.dates_named("Founders").count(), 0);
}

#[test]
fn composed_catalog_may_precede_its_base() {
    let configuration = Configuration::with_custom_holidays(registry());
    configuration.from_json_str(CATALOGS).unwrap();

    let catalog = configuration.catalog("XX-lite").unwrap();
    assert_eq!(catalog.subdivisions(), ["XX", "North"]);
    let holidays = holidays_for_year(&catalog, 2023, "North", false).unwrap();
    assert_eq!(holidays.get(&ymd(2023, 10, 1)), Some("Harvest"));
    assert!(!holidays.contains(&ymd(2023, 6, 21)));
    assert!(!holidays.contains(&ymd(2023, 9, 28)));
    assert_eq!(holidays.get(&ymd(2023, 3, 3)), Some("Coronation"));
}

#[test]
fn json_catalog_can_extend_a_builtin_one() {
    let configuration = Configuration::new().with_builtin_catalogs().unwrap();
    configuration.from_json_str(r#"{
        "holiday_catalogs": [
            {"name": "GB-no-boyne", "base": "GB", "remove": ["Battle of the Boyne"]}
        ]
    }"#).unwrap();

    assert_eq!(configuration.holiday_catalog_manager().names(), ["GB", "GB-no-boyne", "IM"]);
    let catalog = configuration.catalog("GB-no-boyne").unwrap();
    let holidays = holidays_for_year(&catalog, 2023, "Northern Ireland", false).unwrap();
    assert!(!holidays.contains(&ymd(2023, 7, 12)));
    assert_eq!(holidays.get(&ymd(2023, 3, 17)), Some("St. Patrick's Day"));

    let island = configuration.catalog("IM").unwrap();
    let holidays = holidays_for_year(&island, 2023, "IM", false).unwrap();
    assert_eq!(holidays.get(&ymd(2023, 7, 5)), Some("Tynwald Day"));
}

#[test]
fn loads_from_file() {
    let path = std::env::temp_dir().join(format!("holidaycalc-{}.json", process::id()));
    fs::write(&path, CATALOGS).unwrap();

    let configuration = Configuration::with_custom_holidays(registry());
    let result = configuration.from_reader(&path);
    fs::remove_file(&path).unwrap();

    result.unwrap();
    assert!(configuration.catalog("XX").is_ok());
}

#[test]
fn loading_errors() {
    let configuration = Configuration::new();

    assert!(matches!(
        configuration.from_reader("/nonexistent/holidays.json"),
        Err(ManagerError::IOError(_))
    ));
    assert!(matches!(
        configuration.from_json_str("{\"holiday_catalogs\": [}"),
        Err(ManagerError::JsonParseError(_))
    ));
    assert!(matches!(
        configuration.catalog("ZZ"),
        Err(ManagerError::NameNotFoundError(name)) if name == "ZZ"
    ));

    // no "midsummer" registered
    assert!(matches!(
        configuration.from_json_str(CATALOGS),
        Err(ManagerError::HolidayError(HolidayError::InvalidCatalog(_)))
    ));

    assert!(matches!(
        configuration.from_json_str(r#"{"holiday_catalogs": [{"name": "YY", "base": "XX", "remove": ["Nope"]}]}"#),
        Err(ManagerError::NameNotFoundError(_))
    ));
}
