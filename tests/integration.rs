use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use qreki::{civil, Calendar, CalendarConfig, Error, LunisolarDate, Rokuyou};
#[cfg(feature = "serde")]
use qreki::{Time, JD};

fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

fn noon(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
    jst().with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

fn calendar() -> Calendar {
    Calendar::new(CalendarConfig::default()).unwrap()
}

fn lunisolar(month: u32, day: u32, is_leap_month: bool) -> LunisolarDate {
    LunisolarDate {
        month,
        day,
        is_leap_month,
    }
}

#[test]
fn new_year_days() {
    for (y, m, d) in [(2000, 2, 5), (2017, 1, 28), (2023, 1, 22), (2024, 2, 10)] {
        let date = calendar().convert(&noon(y, m, d)).unwrap();
        assert_eq!(date, lunisolar(1, 1, false), "{y}-{m}-{d}");
        assert_eq!(date.rokuyou(), Rokuyou::Sensho);
    }
    assert_eq!(calendar().convert(&noon(2000, 2, 4)).unwrap(), lunisolar(12, 29, false));
}

#[test]
fn leap_months_start_on_known_days() {
    let cases = [
        ((2012, 4, 21), 3),
        ((2014, 10, 24), 9),
        ((2017, 6, 24), 5),
        ((2020, 5, 23), 4),
        ((2023, 3, 22), 2),
    ];
    for ((y, m, d), month) in cases {
        let date = calendar().convert(&noon(y, m, d)).unwrap();
        assert_eq!(date, lunisolar(month, 1, true), "{y}-{m}-{d}");
    }
}

#[test]
fn month_after_leap_is_not_leap() {
    assert_eq!(calendar().convert(&noon(2017, 7, 23)).unwrap(), lunisolar(6, 1, false));
    assert_eq!(calendar().convert(&noon(2023, 4, 20)).unwrap(), lunisolar(3, 1, false));
    assert_eq!(calendar().convert(&noon(2020, 6, 21)).unwrap(), lunisolar(5, 1, false));
}

#[test]
fn utc_input_is_dated_in_local_time() {
    // 2017-06-23T15:00Z is already 2017-06-24 in Japan.
    let utc = Utc.with_ymd_and_hms(2017, 6, 23, 15, 0, 0).unwrap();
    assert_eq!(calendar().convert(&utc).unwrap(), lunisolar(5, 1, true));
    let before = utc - Duration::seconds(1);
    assert_eq!(calendar().convert(&before).unwrap(), lunisolar(5, 29, false));
}

#[test]
fn tables_are_well_formed() {
    let cal = calendar();
    let mut reference = noon(2015, 1, 1);
    while reference < noon(2026, 1, 1) {
        let table = cal.new_moon_table(&reference).unwrap();
        let entries = table.entries();
        for pair in entries.windows(2) {
            let gap = pair[1].date - pair[0].date;
            assert!(gap >= Duration::days(29) && gap <= Duration::days(30), "{reference}");
            assert!((0.0..360.0).contains(&pair[1].solar_longitude));
        }

        let months = table.months();
        assert_eq!(months.len(), 13);
        assert_eq!(months[0].number, 11);
        let leaps = months.iter().filter(|m| m.is_leap).count();
        assert_eq!(leaps, usize::from(table.has_leap_month()), "{reference}");

        let date = table.resolve(&reference).unwrap();
        assert!((1..=12).contains(&date.month));
        assert!((1..=30).contains(&date.day));

        reference += Duration::days(41);
    }
}

#[test]
fn days_advance_one_by_one() {
    let cal = calendar();
    let mut previous = cal.convert(&noon(2016, 12, 1)).unwrap();
    let mut day = noon(2016, 12, 2);
    while day < noon(2018, 1, 1) {
        let current = cal.convert(&day).unwrap();
        if current.day == 1 {
            assert!(previous.day == 29 || previous.day == 30, "{day}");
        } else {
            assert_eq!(current.day, previous.day + 1, "{day}");
            assert_eq!(current.month, previous.month);
            assert_eq!(current.is_leap_month, previous.is_leap_month);
        }
        previous = current;
        day += Duration::days(1);
    }
}

#[test]
fn unparsable_input_is_recoverable() {
    let err = civil::parse_datetime("tomorrow-ish", jst()).unwrap_err();
    assert!(matches!(err, Error::InvalidDate { .. }));
    assert!(!err.is_internal());

    let parsed = civil::parse_datetime("2017/06/24", jst()).unwrap();
    let date = calendar().convert(&parsed).unwrap();
    assert_eq!(date.to_string(), "閏5月1日(大安)");
    assert_eq!(date.rokuyou().explanation(), "思い切ってdeployしちゃいましょう。");
}

#[test]
fn invalid_offset_is_rejected() {
    let config = CalendarConfig::default().with_utc_offset_seconds(-90_000);
    assert_eq!(Calendar::new(config), Err(Error::InvalidUtcOffset(-90_000)));
}

#[test]
fn today_is_a_valid_date() {
    let date = calendar().today().unwrap();
    assert!((1..=12).contains(&date.month));
    assert!((1..=30).contains(&date.day));
}

#[cfg(feature = "serde")]
#[test]
fn serde_lunisolar_date_and_config() {
    let date = lunisolar(5, 1, true);
    let json = serde_json::to_string(&date).unwrap();
    assert_eq!(json, r#"{"month":5,"day":1,"is_leap_month":true}"#);
    assert_eq!(serde_json::from_str::<LunisolarDate>(&json).unwrap(), date);

    let config: CalendarConfig =
        serde_json::from_str(r#"{"utc_offset_seconds":28800,"max_scan_days":30}"#).unwrap();
    assert_eq!(config, CalendarConfig::default().with_utc_offset_seconds(28_800).with_max_scan_days(30));
    assert_eq!(serde_json::to_string(&Rokuyou::Taian).unwrap(), r#""Taian""#);
}

#[cfg(feature = "serde")]
#[test]
fn serde_time_is_a_bare_day_count() {
    let jd = Time::<JD>::new(2_451_545.5);
    let json = serde_json::to_string(&jd).unwrap();
    assert_eq!(json, "2451545.5");
    assert_eq!(serde_json::from_str::<Time<JD>>(&json).unwrap(), jd);

    let instant = Time::<JD>::from_utc(noon(2017, 6, 24).with_timezone(&Utc));
    let back: Time<JD> = serde_json::from_str(&serde_json::to_string(&instant).unwrap()).unwrap();
    assert!((back.value() - instant.value()).abs() < 1e-9);
}
