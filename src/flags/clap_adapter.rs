//! Build a [`FlagSet`] from parsed clap arguments

use super::{Flag, FlagKind, FlagSet};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::any::TypeId;

impl FlagSet {
    /// Collect every long option of `command`, taking values from `matches`.
    ///
    /// Only options given on the command line count as explicitly set; values
    /// clap filled in from defaults are left for the binder to override.
    /// Positionals and help/version switches are not flags and are skipped.
    pub fn from_clap(command: &Command, matches: &ArgMatches) -> Self {
        command.get_arguments().filter_map(|arg| flag_from_arg(arg, matches)).collect()
    }
}

fn flag_from_arg(arg: &Arg, matches: &ArgMatches) -> Option<Flag> {
    let name = arg.get_long()?;
    let kind = match arg.get_action() {
        ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version => {
            return None
        }
        ArgAction::SetTrue | ArgAction::SetFalse => FlagKind::Bool,
        ArgAction::Append => FlagKind::List,
        ArgAction::Count => FlagKind::Uint,
        _ => kind_of_parser(arg),
    };

    let default = match arg.get_action() {
        ArgAction::SetTrue => "false".to_string(),
        ArgAction::SetFalse => "true".to_string(),
        ArgAction::Count => "0".to_string(),
        _ => arg
            .get_default_values()
            .iter()
            .map(|v| v.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(","),
    };

    let flag = Flag::new(name, kind, default);
    let id = arg.get_id().as_str();
    if matches.value_source(id) != Some(ValueSource::CommandLine) {
        return Some(flag);
    }

    let value = match arg.get_action() {
        ArgAction::SetTrue | ArgAction::SetFalse => matches.get_flag(id).to_string(),
        ArgAction::Count => matches.get_count(id).to_string(),
        _ => matches
            .try_get_raw(id)
            .ok()
            .flatten()
            .map(|raw| raw.map(|v| v.to_string_lossy().into_owned()).collect::<Vec<_>>().join(","))
            .unwrap_or_default(),
    };
    Some(flag.explicit(value))
}

/// Map the value type an argument parses into onto a flag kind.
fn kind_of_parser(arg: &Arg) -> FlagKind {
    let parsed = arg.get_value_parser().type_id();
    let is = |ids: &[TypeId]| ids.iter().any(|id| parsed == *id);

    if is(&[
        TypeId::of::<i8>(),
        TypeId::of::<i16>(),
        TypeId::of::<i32>(),
        TypeId::of::<i64>(),
        TypeId::of::<i128>(),
        TypeId::of::<isize>(),
    ]) {
        FlagKind::Int
    } else if is(&[
        TypeId::of::<u8>(),
        TypeId::of::<u16>(),
        TypeId::of::<u32>(),
        TypeId::of::<u64>(),
        TypeId::of::<u128>(),
        TypeId::of::<usize>(),
    ]) {
        FlagKind::Uint
    } else if is(&[TypeId::of::<f32>(), TypeId::of::<f64>()]) {
        FlagKind::Float
    } else if is(&[TypeId::of::<bool>()]) {
        FlagKind::Bool
    } else {
        FlagKind::Text
    }
}
