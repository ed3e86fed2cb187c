pub mod configuration;

pub mod countries {
    pub mod unitedkingdom;
    pub mod isleofman;
}

pub mod manager {
    pub mod managererror;
    pub mod manager;
}

pub mod time {
    pub mod utility;
    pub mod holidayerror;
    pub mod weekendmask;

    pub mod recurringholiday {
        pub mod recurringholiday;
        pub mod fixeddateholiday;
        pub mod nthweekdayholiday;
        pub mod easterrelatedholiday;
        pub mod observedpolicy;
        pub mod recurringholidayloader;
    }

    pub mod calendar {
        pub mod holidayrule;
        pub mod specialoccasion;
        pub mod holidaycatalog;
        pub mod holidaymap;
        pub mod holidaycalendar;
        pub mod holidayengine;
        pub mod cachebackend;
        pub mod cachedholidayengine;
        pub mod holidaycatalogmanager;
    }
}
