fn main() {
    std::process::exit(tradeconf_lib::run());
}
