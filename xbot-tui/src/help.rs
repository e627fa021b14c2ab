pub const GENERAL_HELP: &str = "\
Commands:
  help
  status                      Print the dashboard now
  refresh                     Poll the bot immediately
  start | stop | restart      Control the bot (asks first)
  s | x | r                   Shortcuts, only while the control is enabled
  chart <day|week|month>      Switch the message chart period
  logs [level] [search]       Show recent log lines
  messages                    Show recent messages
  wechat                      Show the WeChat login state
  push <title> <content...>   Send a PushPlus notification
  quit
";

pub fn usage(cmd: &str) -> Option<&'static str> {
    match cmd {
        "chart" => Some("Usage: chart <day|week|month>"),
        "logs" => Some("Usage: logs [DEBUG|INFO|WARNING|ERROR] [search text]"),
        "push" => Some("Usage: push <title> <content...>"),
        _ => None,
    }
}
