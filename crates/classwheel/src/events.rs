use spinwheel::label::Label;
use spinwheel::protocol::ControlCommand;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    Spin,
    AddLabel(Label),
    RemoveLabel(Label),
    ClearLabels,
    ConfigReload,
}

impl From<ControlCommand> for AppEvent {
    fn from(cmd: ControlCommand) -> Self {
        match cmd {
            ControlCommand::Show => Self::Show,
            ControlCommand::Hide => Self::Hide,
            ControlCommand::Spin => Self::Spin,
            ControlCommand::Add(label) => Self::AddLabel(label),
            ControlCommand::Remove(label) => Self::RemoveLabel(label),
            ControlCommand::Clear => Self::ClearLabels,
        }
    }
}
