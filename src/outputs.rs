//! Output variable requests for the radiant system and its plant loops.

use std::fmt;
use std::str::FromStr;

/// Supply outlet node of the chilled water loop.
pub const CHW_SUPPLY_OUTLET_NODE: &str = "Chilled Water Loop Supply Outlet Node";
/// Supply outlet node of the hot water loop.
pub const HW_SUPPLY_OUTLET_NODE: &str = "Hot Water Loop Supply Outlet Node";

const ZONE_RADIANT_VARIABLES: &[&str] = &[
    "Zone Radiant HVAC Cooling Energy",
    "Zone Radiant HVAC Heating Energy",
    "Zone Radiant HVAC Inlet Temperature",
    "Zone Radiant HVAC Outlet Temperature",
    "Zone Radiant HVAC Mass Flow Rate",
];

const AIR_SYSTEM_VARIABLES: &[&str] = &[
    "Air System Electricity Energy",
    "Air System Total Heating Energy",
    "Air System Total Cooling Energy",
];

const CHILLER_VARIABLES: &[&str] = &["Chiller Electricity Rate", "Chiller Electricity Energy"];

const NODE_VARIABLES: &[&str] = &[
    "System Node Mass Flow Rate",
    "System Node Temperature",
    "System Node Setpoint Temperature",
];

/// How often a requested variable is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportingFrequency {
    Detailed,
    Timestep,
    Hourly,
    Daily,
    Monthly,
    RunPeriod,
    Annual,
}

impl ReportingFrequency {
    pub const NAMES: &[&str] = &[
        "Detailed",
        "Timestep",
        "Hourly",
        "Daily",
        "Monthly",
        "RunPeriod",
        "Annual",
    ];
}

impl FromStr for ReportingFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Detailed" => Ok(Self::Detailed),
            "Timestep" => Ok(Self::Timestep),
            "Hourly" => Ok(Self::Hourly),
            "Daily" => Ok(Self::Daily),
            "Monthly" => Ok(Self::Monthly),
            "RunPeriod" => Ok(Self::RunPeriod),
            "Annual" => Ok(Self::Annual),
            other => Err(format!(
                "unknown reporting frequency \"{other}\", available: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for ReportingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Detailed => "Detailed",
            Self::Timestep => "Timestep",
            Self::Hourly => "Hourly",
            Self::Daily => "Daily",
            Self::Monthly => "Monthly",
            Self::RunPeriod => "RunPeriod",
            Self::Annual => "Annual",
        };
        f.write_str(name)
    }
}

/// One requested output variable. A `None` key reports every instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputVariable {
    pub name: String,
    pub key: Option<String>,
    pub frequency: ReportingFrequency,
}

impl OutputVariable {
    fn all(name: &str, frequency: ReportingFrequency) -> Self {
        Self {
            name: name.to_string(),
            key: None,
            frequency,
        }
    }

    fn keyed(name: &str, key: &str, frequency: ReportingFrequency) -> Self {
        Self {
            name: name.to_string(),
            key: Some(key.to_string()),
            frequency,
        }
    }
}

impl fmt::Display for OutputVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.key.as_deref().unwrap_or("*"),
            self.name,
            self.frequency
        )
    }
}

/// Variables tracking radiant coil, air system, chiller and loop supply node behavior.
pub fn radiant_output_variables(frequency: ReportingFrequency) -> Vec<OutputVariable> {
    let mut vars: Vec<OutputVariable> = ZONE_RADIANT_VARIABLES
        .iter()
        .chain(AIR_SYSTEM_VARIABLES)
        .chain(CHILLER_VARIABLES)
        .map(|name| OutputVariable::all(name, frequency))
        .collect();

    for node in [CHW_SUPPLY_OUTLET_NODE, HW_SUPPLY_OUTLET_NODE] {
        vars.extend(
            NODE_VARIABLES
                .iter()
                .map(|name| OutputVariable::keyed(name, node, frequency)),
        );
    }
    vars
}
