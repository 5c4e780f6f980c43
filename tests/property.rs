mod property {
    mod bag_paths;
    mod expansion;
    mod session;
}
