fn main() {
    fst_drill::cli::run();
}
