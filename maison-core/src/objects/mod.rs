//! Object roles
//!
//! The product line has one firmware image per object role. The role is
//! chosen by the build configuration; [`ObjectId`] names every role so the
//! configuration, logs and radio addressing agree on identifiers.

/// Every object role in the product line
///
/// Discriminants are the on-air object ids and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ObjectId {
    BaseStation = 0,
    SmartLight = 1,
    NightLight = 2,
    BrightnessSensor = 3,
    StationMeteoInt = 4,
    OutWeatherStation = 5,
    RollerShutter = 6,
    Alarm = 7,
    FireDetector = 8,
    WineDegustation = 9,
    Ventilator = 10,
    Gsm = 11,
    FallSensor = 12,
    TrackerGps = 13,
    VoiceControl = 14,
    TouchScreen = 15,
    EPaper = 16,
    MatrixLeds = 17,
    LcdSlider = 18,
}

impl ObjectId {
    /// All roles, in id order
    pub const ALL: [ObjectId; 19] = [
        ObjectId::BaseStation,
        ObjectId::SmartLight,
        ObjectId::NightLight,
        ObjectId::BrightnessSensor,
        ObjectId::StationMeteoInt,
        ObjectId::OutWeatherStation,
        ObjectId::RollerShutter,
        ObjectId::Alarm,
        ObjectId::FireDetector,
        ObjectId::WineDegustation,
        ObjectId::Ventilator,
        ObjectId::Gsm,
        ObjectId::FallSensor,
        ObjectId::TrackerGps,
        ObjectId::VoiceControl,
        ObjectId::TouchScreen,
        ObjectId::EPaper,
        ObjectId::MatrixLeds,
        ObjectId::LcdSlider,
    ];

    /// Get the id as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create an id from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Human-readable name, as shown in boot logs
    pub fn name(self) -> &'static str {
        match self {
            ObjectId::BaseStation => "Base Station",
            ObjectId::SmartLight => "Smart Light",
            ObjectId::NightLight => "Night Light",
            ObjectId::BrightnessSensor => "Brightness Sensor",
            ObjectId::StationMeteoInt => "Station Meteo Int",
            ObjectId::OutWeatherStation => "Station Meteo Ext",
            ObjectId::RollerShutter => "Roller Shutter",
            ObjectId::Alarm => "Alarm",
            ObjectId::FireDetector => "Fire Detector",
            ObjectId::WineDegustation => "Wine Degustation",
            ObjectId::Ventilator => "Ventilator",
            ObjectId::Gsm => "GSM",
            ObjectId::FallSensor => "Fall Sensor",
            ObjectId::TrackerGps => "Tracker GPS",
            ObjectId::VoiceControl => "Voice Control",
            ObjectId::TouchScreen => "Touch Screen",
            ObjectId::EPaper => "E Paper",
            ObjectId::MatrixLeds => "Matrix Leds",
            ObjectId::LcdSlider => "Slider LCD",
        }
    }

    /// Configuration key (`[object] kind = "..."`)
    pub fn key(self) -> &'static str {
        match self {
            ObjectId::BaseStation => "base_station",
            ObjectId::SmartLight => "smart_light",
            ObjectId::NightLight => "night_light",
            ObjectId::BrightnessSensor => "brightness_sensor",
            ObjectId::StationMeteoInt => "station_meteo_int",
            ObjectId::OutWeatherStation => "out_weather_station",
            ObjectId::RollerShutter => "roller_shutter",
            ObjectId::Alarm => "alarm",
            ObjectId::FireDetector => "fire_detector",
            ObjectId::WineDegustation => "wine_degustation",
            ObjectId::Ventilator => "ventilator",
            ObjectId::Gsm => "gsm",
            ObjectId::FallSensor => "fall_sensor",
            ObjectId::TrackerGps => "tracker_gps",
            ObjectId::VoiceControl => "voice_control",
            ObjectId::TouchScreen => "touch_screen",
            ObjectId::EPaper => "e_paper",
            ObjectId::MatrixLeds => "matrix_leds",
            ObjectId::LcdSlider => "lcd_slider",
        }
    }

    /// Look up a role by configuration key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.key() == key.trim())
    }
}
